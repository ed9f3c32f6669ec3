use serde::{Deserialize, Serialize};

use wastewatch_domain::badge::Timeframe;
use wastewatch_domain::level::{LevelTier, UserLevel};
use wastewatch_domain::stats::UserStats;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStatsDto {
    pub user_id: String,
    pub timeframe: String,
    pub reports_count: i64,
    pub collected_count: i64,
    pub points_total: i64,
    pub streak_days: i64,
}

impl UserStatsDto {
    pub fn new(user_id: &str, timeframe: Timeframe, stats: &UserStats) -> Self {
        Self {
            user_id: user_id.to_string(),
            timeframe: timeframe.to_string(),
            reports_count: stats.reports_count,
            collected_count: stats.collected_count,
            points_total: stats.points_total,
            streak_days: stats.streak_days,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LevelDto {
    pub level: u32,
    pub name: String,
    pub color: String,
    pub min_points: i64,
}

impl From<&LevelTier> for LevelDto {
    fn from(tier: &LevelTier) -> Self {
        Self {
            level: tier.level,
            name: tier.name.clone(),
            color: tier.color.clone(),
            min_points: tier.min_points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserLevelDto {
    pub current: LevelDto,
    pub next: Option<LevelDto>,
    pub progress: u8,
    pub points_to_next: i64,
}

impl From<&UserLevel> for UserLevelDto {
    fn from(level: &UserLevel) -> Self {
        Self {
            current: LevelDto::from(&level.current),
            next: level.next.as_ref().map(LevelDto::from),
            progress: level.progress,
            points_to_next: level.points_to_next,
        }
    }
}
