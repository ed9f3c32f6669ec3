use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::persistence::{RepositoryErrorMapper, SqliteRepositoryBase};
use wastewatch_domain::events::{EventHandler, NotificationRaised};
use wastewatch_domain::shared::{DomainError, UserId};

/// One stored notification as a client would read it
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InboxEntry {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub payload: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Persists raised notifications into the `notifications` table
pub struct SqliteNotificationInbox {
    base: SqliteRepositoryBase,
}

impl SqliteNotificationInbox {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    /// Newest first
    pub async fn list_for_user(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<InboxEntry>, DomainError> {
        let query = r#"
            SELECT id, kind, title, payload, is_read, created_at
            FROM notifications
            WHERE user_id = ?1
            ORDER BY created_at DESC, id ASC
            LIMIT ?2
        "#;

        self.base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(user_id.as_str())
                    .bind(i64::from(limit)),
                "List notifications",
            )
            .await
    }
}

#[async_trait]
impl EventHandler<NotificationRaised> for SqliteNotificationInbox {
    async fn handle(&self, event: &NotificationRaised) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&event.notification.payload)
            .map_err(|e| RepositoryErrorMapper::map_json_error(e, "Serialize notification payload"))?;

        // A redelivered award hits the unique dedupe_key and stores nothing
        let query = r#"
            INSERT INTO notifications (id, user_id, kind, dedupe_key, title, payload, is_read, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)
            ON CONFLICT(dedupe_key) DO NOTHING
        "#;

        let inserted = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(Uuid::new_v4().to_string())
                    .bind(event.user_id.as_str())
                    .bind(event.notification.kind.as_str())
                    .bind(event.notification.dedupe_key(&event.user_id))
                    .bind(&event.notification.title)
                    .bind(payload)
                    .bind(event.occurred_at),
                "Store notification",
            )
            .await?;

        if inserted.rows_affected() == 0 {
            debug!(
                user_id = %event.user_id,
                kind = event.notification.kind.as_str(),
                "Notification already stored"
            );
        } else {
            info!(
                user_id = %event.user_id,
                kind = event.notification.kind.as_str(),
                "Notification stored"
            );
        }

        Ok(())
    }
}
