use async_trait::async_trait;
use std::sync::Arc;

use wastewatch_domain::events::{EventBus, NotificationRaised};
use wastewatch_domain::notification::{Notification, Notifier};
use wastewatch_domain::shared::{Clock, DomainError, UserId};

/// Delivers notifications as `NotificationRaised` events.
///
/// Any handler failure surfaces as `DownstreamNotify` so the caller keeps
/// the award marked as undelivered.
pub struct EventBusNotifier {
    event_bus: Arc<dyn EventBus>,
    clock: Arc<dyn Clock>,
}

impl EventBusNotifier {
    pub fn new(event_bus: Arc<dyn EventBus>, clock: Arc<dyn Clock>) -> Self {
        Self { event_bus, clock }
    }
}

#[async_trait]
impl Notifier for EventBusNotifier {
    async fn notify(&self, user_id: &UserId, notification: Notification) -> Result<(), DomainError> {
        let event = NotificationRaised {
            user_id: user_id.clone(),
            notification,
            occurred_at: self.clock.now(),
        };

        self.event_bus
            .publish(Box::new(event))
            .await
            .map_err(|e| DomainError::DownstreamNotify(format!("user {}: {}", user_id, e.message())))
    }
}
