use async_trait::async_trait;

use super::User;
use crate::shared::{DomainError, UserId};

/// Lookup side of the user store
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user or fail with `UserNotFound`
    async fn get(&self, id: &UserId) -> Result<User, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }
}
