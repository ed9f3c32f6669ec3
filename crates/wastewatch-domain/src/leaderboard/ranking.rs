use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::badge::Timeframe;
use crate::shared::{string_enum, PageRequest, UserId};

/// Metric users are ranked by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardType {
    #[default]
    Points,
    Reports,
    Collected,
}

string_enum!(LeaderboardType, "leaderboard type", InvalidInput, {
    Points => "points",
    Reports => "reports",
    Collected => "collected",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub leaderboard_type: LeaderboardType,
    pub period: Timeframe,
    pub page: PageRequest,
}

/// One user's metric before ranks are assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub metric_value: i64,
    pub created_at: DateTime<Utc>,
}

impl LeaderboardRow {
    /// Metric desc, then earlier account first, then id
    pub fn standing_cmp(&self, other: &Self) -> Ordering {
        other
            .metric_value
            .cmp(&self.metric_value)
            .then_with(|| self.created_at.cmp(&other.created_at))
            .then_with(|| self.user_id.cmp(&other.user_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub metric_value: i64,
    pub rank: u64,
}

/// Order one page of rows and number them from the page's offset
pub fn assign_ranks(mut rows: Vec<LeaderboardRow>, page: PageRequest) -> Vec<LeaderboardEntry> {
    rows.sort_by(LeaderboardRow::standing_cmp);
    rows.truncate(page.limit() as usize);

    let offset = page.offset();
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| LeaderboardEntry {
            rank: offset + index as u64 + 1,
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            metric_value: row.metric_value,
        })
        .collect()
}
