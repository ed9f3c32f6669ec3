use std::any::{Any, TypeId};

pub mod event_bus;
pub mod notification_events;

pub use event_bus::{DynamicEventHandler, EventBus, EventHandler, TypedEventHandlerWrapper};
pub use notification_events::NotificationRaised;

/// Base trait for all domain events
pub trait DomainEvent: Send + Sync + Any {
    /// Convert to Any for type-safe downcasting
    fn as_any(&self) -> &(dyn Any + Send + Sync);

    /// Key handlers are registered under
    fn event_type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Fully qualified type name, used in logs
    fn event_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
