use serde::{Deserialize, Serialize};

use wastewatch_domain::badge::Timeframe;
use wastewatch_domain::leaderboard::{LeaderboardEntry, LeaderboardType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardOptions {
    #[serde(default)]
    pub leaderboard_type: LeaderboardType,
    #[serde(default)]
    pub period: Timeframe,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntryDto {
    pub rank: u64,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub metric_value: i64,
}

impl From<LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            user_id: entry.user_id.to_string(),
            name: entry.name,
            email: entry.email,
            metric_value: entry.metric_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardDto {
    pub leaderboard_type: String,
    pub period: String,
    pub page: u32,
    pub limit: u32,
    pub entries: Vec<LeaderboardEntryDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRankDto {
    pub user_id: String,
    pub leaderboard_type: String,
    pub period: String,
    /// `None` when the user is not ranked (admins)
    pub rank: Option<u64>,
    pub metric_value: Option<i64>,
}
