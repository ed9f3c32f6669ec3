#[cfg(test)]
mod tests {
    use super::super::ladder::*;

    fn short_ladder() -> LevelLadder {
        LevelLadder::new(vec![
            LevelTier::new(1, "One", "#111", 0),
            LevelTier::new(2, "Two", "#222", 100),
            LevelTier::new(3, "Three", "#333", 300),
        ])
        .unwrap()
    }

    #[test]
    fn test_mid_tier_progress() {
        let level = short_ladder().calculate(150);
        assert_eq!(level.current.level, 2);
        assert_eq!(level.next.as_ref().map(|t| t.level), Some(3));
        assert_eq!(level.progress, 25);
        assert_eq!(level.points_to_next, 150);
    }

    #[test]
    fn test_exact_threshold_enters_tier() {
        let level = short_ladder().calculate(100);
        assert_eq!(level.current.level, 2);
        assert_eq!(level.progress, 0);
    }

    #[test]
    fn test_top_tier() {
        let level = short_ladder().calculate(10_000);
        assert_eq!(level.current.level, 3);
        assert!(level.next.is_none());
        assert_eq!(level.progress, 100);
        assert_eq!(level.points_to_next, 0);
    }

    #[test]
    fn test_negative_points_treated_as_zero() {
        let level = short_ladder().calculate(-50);
        assert_eq!(level.current.level, 1);
        assert_eq!(level.points_to_next, 100);
    }

    #[test]
    fn test_bounds_hold_across_default_ladder() {
        let ladder = LevelLadder::default();
        for points in (0..3000).step_by(7) {
            let level = ladder.calculate(points);
            assert!(level.current.min_points <= points);
            if let Some(next) = &level.next {
                assert!(points < next.min_points);
            }
        }
    }

    #[test]
    fn test_default_ladder_is_valid() {
        let ladder = LevelLadder::default();
        assert!(LevelLadder::new(ladder.tiers().to_vec()).is_ok());
        assert_eq!(ladder.tiers().len(), 7);
    }

    #[test]
    fn test_invalid_ladders_rejected() {
        assert!(LevelLadder::new(vec![]).is_err());
        assert!(LevelLadder::new(vec![LevelTier::new(1, "One", "#111", 10)]).is_err());
        assert!(LevelLadder::new(vec![
            LevelTier::new(1, "One", "#111", 0),
            LevelTier::new(2, "Two", "#222", 100),
            LevelTier::new(3, "Three", "#333", 100),
        ])
        .is_err());
    }
}
