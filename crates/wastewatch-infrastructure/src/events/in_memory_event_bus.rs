use async_trait::async_trait;
use log::{debug, error, info};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use wastewatch_domain::events::{DomainEvent, DynamicEventHandler, EventBus};
use wastewatch_domain::shared::DomainError;

/// In-memory event bus; dispatches to handlers in subscription order
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<Arc<dyn DynamicEventHandler>>>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe a handler to a specific event type
    pub async fn subscribe<E: DomainEvent + 'static>(&self, handler: Arc<dyn DynamicEventHandler>) {
        let mut handlers = self.handlers.write().await;
        handlers.entry(TypeId::of::<E>()).or_default().push(handler);

        info!(
            "Subscribed handler for event type: {}",
            std::any::type_name::<E>()
        );
    }

    pub async fn handler_count<E: DomainEvent + 'static>(&self) -> usize {
        let handlers = self.handlers.read().await;
        handlers.get(&TypeId::of::<E>()).map_or(0, |h| h.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish(&self, event: Box<dyn DomainEvent>) -> Result<(), DomainError> {
        let event_type_name = event.event_type_name();
        let type_id = event.event_type_id();
        let event_any = event.as_any();

        debug!("Publishing event: {}", event_type_name);

        let handlers = self.handlers.read().await;
        let Some(event_handlers) = handlers.get(&type_id) else {
            debug!("No handlers registered for event type: {}", event_type_name);
            return Ok(());
        };

        // Every handler runs; the first failure is reported to the publisher
        let mut first_error = None;
        for handler in event_handlers {
            if let Err(e) = handler.handle_dynamic(event_any).await {
                error!("Handler failed to process event {}: {}", event_type_name, e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wastewatch_domain::events::{EventHandler, NotificationRaised, TypedEventHandlerWrapper};
    use wastewatch_domain::notification::Notification;
    use wastewatch_domain::shared::UserId;

    struct RecordingHandler {
        seen: Arc<RwLock<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl EventHandler<NotificationRaised> for RecordingHandler {
        async fn handle(&self, event: &NotificationRaised) -> Result<(), DomainError> {
            self.seen.write().await.push(event.notification.title.clone());
            if self.fail {
                return Err(DomainError::Infrastructure("sink offline".to_string()));
            }
            Ok(())
        }
    }

    fn event() -> Box<NotificationRaised> {
        Box::new(NotificationRaised {
            user_id: UserId::from_string("u1"),
            notification: Notification::badge_earned("b1", "First Report", "📝", 10),
            occurred_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_event_bus_publishes_to_handlers() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let handler = RecordingHandler {
            seen: seen.clone(),
            fail: false,
        };
        bus.subscribe::<NotificationRaised>(Arc::new(TypedEventHandlerWrapper::new(handler)))
            .await;

        assert_eq!(bus.handler_count::<NotificationRaised>().await, 1);
        bus.publish(event()).await.unwrap();

        assert_eq!(seen.read().await.as_slice(), ["Badge earned: First Report"]);
    }

    #[tokio::test]
    async fn test_handler_failure_reaches_publisher() {
        let bus = InMemoryEventBus::new();
        let seen = Arc::new(RwLock::new(Vec::new()));
        for fail in [true, false] {
            let handler = RecordingHandler {
                seen: seen.clone(),
                fail,
            };
            bus.subscribe::<NotificationRaised>(Arc::new(TypedEventHandlerWrapper::new(handler)))
                .await;
        }

        let result = bus.publish(event()).await;

        assert!(result.is_err());
        // The second handler still ran
        assert_eq!(seen.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_no_handlers_is_ok() {
        let bus = InMemoryEventBus::new();
        assert!(bus.publish(event()).await.is_ok());
    }
}
