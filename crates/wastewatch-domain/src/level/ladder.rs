use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTier {
    pub level: u32,
    pub name: String,
    pub color: String,
    pub min_points: i64,
}

impl LevelTier {
    pub fn new(level: u32, name: &str, color: &str, min_points: i64) -> Self {
        Self {
            level,
            name: name.to_string(),
            color: color.to_string(),
            min_points,
        }
    }
}

/// Where a point total sits on the ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLevel {
    pub current: LevelTier,
    pub next: Option<LevelTier>,
    pub progress: u8,
    pub points_to_next: i64,
}

/// Ordered tiers with strictly increasing thresholds, starting at 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelLadder {
    tiers: Vec<LevelTier>,
}

impl LevelLadder {
    pub fn new(tiers: Vec<LevelTier>) -> Result<Self, DomainError> {
        let Some(first) = tiers.first() else {
            return Err(DomainError::Validation(
                "Level ladder cannot be empty".to_string(),
            ));
        };

        if first.min_points != 0 {
            return Err(DomainError::Validation(format!(
                "First level must start at 0 points, got {}",
                first.min_points
            )));
        }

        if let Some(pair) = tiers.windows(2).find(|w| w[1].min_points <= w[0].min_points) {
            return Err(DomainError::Validation(format!(
                "Level thresholds must be strictly increasing: '{}' ({}) then '{}' ({})",
                pair[0].name, pair[0].min_points, pair[1].name, pair[1].min_points
            )));
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[LevelTier] {
        &self.tiers
    }

    pub fn calculate(&self, total_points: i64) -> UserLevel {
        let points = total_points.max(0);

        // The first tier is at 0, so at least one tier always qualifies
        let index = self
            .tiers
            .iter()
            .rposition(|t| t.min_points <= points)
            .unwrap_or(0);

        let current = self.tiers[index].clone();
        let next = self.tiers.get(index + 1).cloned();

        let (progress, points_to_next) = match &next {
            Some(next) => {
                let span = (next.min_points - current.min_points) as f64;
                let gained = (points - current.min_points) as f64;
                let progress = (gained / span * 100.0).round().clamp(0.0, 100.0) as u8;
                (progress, next.min_points - points)
            }
            None => (100, 0),
        };

        UserLevel {
            current,
            next,
            progress,
            points_to_next,
        }
    }
}

impl Default for LevelLadder {
    fn default() -> Self {
        Self {
            tiers: vec![
                LevelTier::new(1, "Newcomer", "#9E9E9E", 0),
                LevelTier::new(2, "Contributor", "#8BC34A", 100),
                LevelTier::new(3, "Active Citizen", "#4CAF50", 300),
                LevelTier::new(4, "Eco Guardian", "#009688", 600),
                LevelTier::new(5, "Green Champion", "#2196F3", 1000),
                LevelTier::new(6, "Sustainability Hero", "#9C27B0", 1500),
                LevelTier::new(7, "Earth Protector", "#FF9800", 2500),
            ],
        }
    }
}
