use crate::EditorCommand;
use pan_dom::DomRange;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// The three fixed bus topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTopic {
    Change,
    SelectionChange,
    Command,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    Change {
        html: String,
    },
    SelectionChange {
        ranges: Option<Vec<DomRange>>,
    },
    Command {
        command: EditorCommand,
        value: Option<String>,
    },
}

impl EditorEvent {
    pub fn topic(&self) -> EventTopic {
        match self {
            EditorEvent::Change { .. } => EventTopic::Change,
            EditorEvent::SelectionChange { .. } => EventTopic::SelectionChange,
            EditorEvent::Command { .. } => EventTopic::Command,
        }
    }

    /// JSON form for host bridges.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

type Handler = Rc<dyn Fn(&EditorEvent)>;

#[derive(Default)]
struct Registry {
    handlers: HashMap<EventTopic, Vec<(Uuid, Handler)>>,
}

/// Synchronous publish/subscribe hub. Handlers for a topic run in
/// registration order; there is no buffering and no replay for late
/// subscribers. Panics raised by a handler are not caught here.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Dropping the returned [`Subscription`] removes
    /// exactly this handler.
    pub fn on(&self, topic: EventTopic, handler: impl Fn(&EditorEvent) + 'static) -> Subscription {
        let id = Uuid::new_v4();
        self.registry
            .borrow_mut()
            .handlers
            .entry(topic)
            .or_default()
            .push((id, Rc::new(handler)));
        Subscription {
            registry: Rc::downgrade(&self.registry),
            topic,
            id,
        }
    }

    pub fn emit(&self, event: &EditorEvent) {
        let topic = event.topic();
        // snapshot so handlers may subscribe/unsubscribe during dispatch
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .handlers
            .get(&topic)
            .map(|list| list.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default();
        tracing::trace!(?topic, count = handlers.len(), "dispatching event");
        for handler in handlers {
            handler(event);
        }
    }

    pub fn handler_count(&self, topic: EventTopic) -> usize {
        self.registry
            .borrow()
            .handlers
            .get(&topic)
            .map_or(0, |list| list.len())
    }
}

/// Scoped handler registration. The handler is removed when this guard is
/// dropped, so subscriptions cannot outlive their owner.
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    topic: EventTopic,
    id: Uuid,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(list) = registry.borrow_mut().handlers.get_mut(&self.topic) {
                list.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
