use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use wastewatch_domain::shared::{DomainError, UserId};
use wastewatch_domain::stats::SpecialActionSource;

/// `user_special_actions` rows are written by outer layers (event check-ins,
/// early-adopter grants); the engine only reads them.
pub struct SqliteSpecialActionRepository {
    base: SqliteRepositoryBase,
}

impl SqliteSpecialActionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    /// Flag an action as done; repeated calls keep the first timestamp
    pub async fn record(
        &self,
        user_id: &UserId,
        action: &str,
        completed_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO user_special_actions (user_id, action, completed_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id, action) DO NOTHING
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(user_id.as_str())
                    .bind(action)
                    .bind(completed_at),
                "Record special action",
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl SpecialActionSource for SqliteSpecialActionRepository {
    async fn has_completed(&self, user_id: &UserId, action: &str) -> Result<bool, DomainError> {
        let count = self
            .base
            .fetch_scalar(
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM user_special_actions WHERE user_id = ?1 AND action = ?2",
                )
                .bind(user_id.as_str())
                .bind(action),
                "Check special action",
            )
            .await?;

        Ok(count > 0)
    }
}
