use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::UserBadge;
use crate::badge::Badge;
use crate::shared::{BadgeId, DomainError, PageRequest, UserBadgeId, UserId};
use crate::user::PointsCredit;

/// Listing options for a user's badges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBadgeQuery {
    pub completed_only: bool,
}

/// A progress record joined with its catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBadgeDetails {
    pub user_badge: UserBadge,
    pub badge: Badge,
}

#[async_trait]
pub trait UserBadgeRepository: Send + Sync {
    async fn find(
        &self,
        user_id: &UserId,
        badge_id: &BadgeId,
    ) -> Result<Option<UserBadge>, DomainError>;

    /// Insert unless a record for (user, badge) already exists.
    /// Returns whether this call created it.
    async fn insert_if_absent(&self, record: &UserBadge) -> Result<bool, DomainError>;

    /// Persist progress of an incomplete record; a completed row is left as is.
    /// Returns whether a row was updated.
    async fn update_progress(&self, record: &UserBadge) -> Result<bool, DomainError>;

    /// Flip the record to completed and apply the points credit, atomically.
    ///
    /// Only succeeds while the stored row is still incomplete. `Ok(false)`
    /// means another caller completed it first.
    async fn complete_if_pending(
        &self,
        record: &UserBadge,
        credit: &PointsCredit,
    ) -> Result<bool, DomainError>;

    async fn mark_notified(&self, id: &UserBadgeId) -> Result<(), DomainError>;

    /// Completed first (newest earned first), then in-progress by percentage
    async fn list_for_user(
        &self,
        user_id: &UserId,
        query: UserBadgeQuery,
        page: PageRequest,
    ) -> Result<(Vec<UserBadgeDetails>, u64), DomainError>;

    async fn count_completed(&self, user_id: &UserId) -> Result<u64, DomainError>;
}
