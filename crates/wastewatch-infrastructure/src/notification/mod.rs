mod event_bus_notifier;
mod inbox;

pub use event_bus_notifier::EventBusNotifier;
pub use inbox::{InboxEntry, SqliteNotificationInbox};
