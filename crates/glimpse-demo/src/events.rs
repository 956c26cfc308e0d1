//! Synchronous event bus standing in for a windowing toolkit's canvas
//! events.

use glimpse_core::{CanvasEvent, EventHandler, EventKind, EventSource, SubscriptionId};

/// Single-threaded event dispatcher.
///
/// Handlers registered through [`EventSource`] run inline from [`emit`],
/// matching the cooperative event-loop model the cache expects.
///
/// [`emit`]: EventBus::emit
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, EventKind, EventHandler)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch `event` to every handler subscribed to its kind.
    pub fn emit(&mut self, event: &CanvasEvent) {
        for (_, kind, handler) in &mut self.handlers {
            if *kind == event.kind() {
                handler(event);
            }
        }
    }
}

impl EventSource for EventBus {
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, handler));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.handlers.retain(|(sid, _, _)| *sid != id);
    }
}
