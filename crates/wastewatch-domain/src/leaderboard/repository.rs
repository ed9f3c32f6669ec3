use async_trait::async_trait;

use super::ranking::{LeaderboardRow, LeaderboardType};
use crate::shared::{DomainError, PageRequest};
use crate::stats::TimeWindow;

/// Per-user metric aggregation over non-admin accounts
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// One page of rows in standing order
    async fn fetch_rows(
        &self,
        leaderboard_type: LeaderboardType,
        window: &TimeWindow,
        page: PageRequest,
    ) -> Result<Vec<LeaderboardRow>, DomainError>;

    /// Every row in standing order
    async fn fetch_all_rows(
        &self,
        leaderboard_type: LeaderboardType,
        window: &TimeWindow,
    ) -> Result<Vec<LeaderboardRow>, DomainError>;
}
