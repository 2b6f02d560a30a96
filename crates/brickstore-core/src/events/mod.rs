//! Aggregate lifecycle events
//!
//! The repository publishes a [`RelationalEvent`] at each lifecycle step.
//! Listeners run synchronously, in registration order, on the caller's
//! thread. Payloads are type-erased; a listener downcasts to the aggregate
//! types it cares about and ignores the rest.

pub mod id_setting;

use std::any::Any;
use std::sync::Arc;

pub use id_setting::IdSettingListener;

/// A lifecycle step of an aggregate
pub enum RelationalEvent<'a> {
    /// The aggregate is about to be written; listeners may mutate it
    BeforeSave { entity: &'a mut dyn Any },
    /// The aggregate and all its children were written
    AfterSave { entity: &'a dyn Any },
    /// The aggregate was read and fully hydrated
    AfterLoad { entity: &'a dyn Any },
    /// The root row `id` of `table` is about to be removed
    BeforeDelete { table: &'a str, id: i64 },
    /// The root row `id` of `table` and its children were removed
    AfterDelete { table: &'a str, id: i64 },
}

impl RelationalEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            RelationalEvent::BeforeSave { .. } => "before_save",
            RelationalEvent::AfterSave { .. } => "after_save",
            RelationalEvent::AfterLoad { .. } => "after_load",
            RelationalEvent::BeforeDelete { .. } => "before_delete",
            RelationalEvent::AfterDelete { .. } => "after_delete",
        }
    }
}

/// Callback registered for aggregate lifecycle events
///
/// Listeners must not fail: an event is a notification, and anything a
/// listener needs to reject belongs in validation before `save`.
pub trait ApplicationListener: Send + Sync {
    fn on_event(&self, event: &mut RelationalEvent<'_>);
}

/// Ordered set of listeners
#[derive(Clone, Default)]
pub struct EventPublisher {
    listeners: Vec<Arc<dyn ApplicationListener>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, listener: Arc<dyn ApplicationListener>) {
        self.listeners.push(listener);
    }

    pub fn with_listener(mut self, listener: Arc<dyn ApplicationListener>) -> Self {
        self.register(listener);
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every listener in registration order
    pub fn publish(&self, event: &mut RelationalEvent<'_>) {
        tracing::trace!(event = event.name(), listeners = self.listeners.len(), "publish");
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
