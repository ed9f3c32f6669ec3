use serde::{Deserialize, Serialize};

/// Progress toward a threshold.
///
/// `percentage` is in `[0, 100]` and is exactly 100 iff `current >= target`;
/// an incomplete value that would round up to 100 is held at 99.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeProgress {
    current: i64,
    target: i64,
    percentage: u8,
}

impl BadgeProgress {
    pub fn compute(current: i64, target: i64) -> Self {
        let current = current.max(0);
        let target = target.max(0);

        let percentage = if current >= target {
            100
        } else {
            let ratio = (current as f64 / target as f64 * 100.0).round();
            (ratio as u8).min(99)
        };

        Self {
            current,
            target,
            percentage,
        }
    }

    /// Fresh record before any evaluation
    pub fn pending(target: i64) -> Self {
        Self {
            current: 0,
            target: target.max(0),
            percentage: 0,
        }
    }

    pub fn from_persistence(current: i64, target: i64, percentage: u8) -> Self {
        Self {
            current,
            target,
            percentage: percentage.min(100),
        }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_progress() {
        let p = BadgeProgress::compute(40, 100);
        assert_eq!(p.percentage(), 40);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_overshoot_caps_at_100() {
        let p = BadgeProgress::compute(6, 5);
        assert_eq!(p.percentage(), 100);
        assert!(p.is_complete());
    }

    #[test]
    fn test_near_complete_never_reads_100() {
        let p = BadgeProgress::compute(996, 1000);
        assert_eq!(p.percentage(), 99);
        assert!(!p.is_complete());
    }

    #[test]
    fn test_zero_target_is_complete() {
        let p = BadgeProgress::compute(0, 0);
        assert_eq!(p.percentage(), 100);
        assert!(p.is_complete());
    }

    #[test]
    fn test_percentage_iff_complete() {
        for target in [1, 3, 7, 100, 1000] {
            for current in 0..=target + 2 {
                let p = BadgeProgress::compute(current, target);
                assert!(p.percentage() <= 100);
                assert_eq!(p.percentage() == 100, p.is_complete());
            }
        }
    }
}
