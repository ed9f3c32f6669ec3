use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;

use super::DomainEvent;
use crate::notification::Notification;
use crate::shared::UserId;

/// A user-facing notification is ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRaised {
    pub user_id: UserId,
    pub notification: Notification,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent for NotificationRaised {
    fn as_any(&self) -> &(dyn Any + Send + Sync) {
        self
    }
}
