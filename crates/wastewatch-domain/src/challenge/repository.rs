use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, UserId};
use crate::user::PointsCredit;

/// Record that a user's reward for one challenge on one day was granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeCompletion {
    pub user_id: UserId,
    pub challenge_key: String,
    pub challenge_date: NaiveDate,
    pub points: i64,
    pub notified: bool,
    pub completed_at: DateTime<Utc>,
}

#[async_trait]
pub trait ChallengeRepository: Send + Sync {
    async fn find_completion(
        &self,
        user_id: &UserId,
        challenge_key: &str,
        challenge_date: NaiveDate,
    ) -> Result<Option<ChallengeCompletion>, DomainError>;

    /// Insert the completion row and apply the credit in one transaction.
    /// `Ok(false)` if the reward was already granted.
    async fn record_completion_if_absent(
        &self,
        completion: &ChallengeCompletion,
        credit: &PointsCredit,
    ) -> Result<bool, DomainError>;

    async fn mark_notified(
        &self,
        user_id: &UserId,
        challenge_key: &str,
        challenge_date: NaiveDate,
    ) -> Result<(), DomainError>;
}
