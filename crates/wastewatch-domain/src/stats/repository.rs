use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};

use super::window::TimeWindow;
use crate::shared::{DomainError, UserId};

/// Aggregates over the report store and the points ledger
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Reports filed by the user with `created_at` inside the window
    async fn count_reports(&self, user_id: &UserId, window: &TimeWindow) -> Result<i64, DomainError>;

    /// The user's reports that reached `collected` inside the window
    async fn count_collected(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
    ) -> Result<i64, DomainError>;

    /// Sum of ledger entries inside the window
    async fn sum_points(&self, user_id: &UserId, window: &TimeWindow) -> Result<i64, DomainError>;

    /// Distinct local dates on which the user filed at least one report
    async fn report_days(
        &self,
        user_id: &UserId,
        window: &TimeWindow,
        offset: FixedOffset,
    ) -> Result<Vec<NaiveDate>, DomainError>;
}

/// Flags for `special_action` criteria, written by outer layers
#[async_trait]
pub trait SpecialActionSource: Send + Sync {
    async fn has_completed(&self, user_id: &UserId, action: &str) -> Result<bool, DomainError>;
}
