use async_trait::async_trait;

use super::aggregate::{Badge, BadgeFilter};
use crate::shared::{BadgeId, DomainError};

/// Badge catalog repository trait
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// Insert a badge unless one with the same name exists.
    ///
    /// Returns `true` when the badge was inserted.
    async fn insert_if_absent(&self, badge: &Badge) -> Result<bool, DomainError>;

    /// Persist mutable fields (currently only the active flag)
    async fn update(&self, badge: &Badge) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &BadgeId) -> Result<Option<Badge>, DomainError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Badge>, DomainError>;

    /// List badges matching a filter, ordered by category then name
    async fn find_all(&self, filter: &BadgeFilter) -> Result<Vec<Badge>, DomainError>;

    /// All active badges; the set a sweep evaluates
    async fn find_active(&self) -> Result<Vec<Badge>, DomainError> {
        self.find_all(&BadgeFilter::active_only()).await
    }
}
