//! Event-subscription capability consumed from the host canvas.

use serde::{Deserialize, Serialize};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Canvas events the cache subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CanvasEvent {
    /// A mouse button was released, ending a pan/zoom interaction.
    ButtonRelease { button: MouseButton, x: f64, y: f64 },
    /// The canvas device dimensions changed.
    Resize { width: u32, height: u32 },
}

impl CanvasEvent {
    /// The subscription category this event belongs to.
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::ButtonRelease { .. } => EventKind::ButtonRelease,
            Self::Resize { .. } => EventKind::Resize,
        }
    }
}

/// Subscription categories offered by an [`EventSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ButtonRelease,
    Resize,
}

/// Opaque handle identifying one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Callback registered against an [`EventSource`].
pub type EventHandler = Box<dyn FnMut(&CanvasEvent)>;

/// Event-dispatch capability of the host canvas.
///
/// Handlers run synchronously on the host's event loop. A subscription
/// stays live until its id is passed back to [`unsubscribe`].
///
/// [`unsubscribe`]: EventSource::unsubscribe
pub trait EventSource {
    /// Register `handler` for events of `kind`.
    fn subscribe(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId;

    /// Remove a previously registered handler. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}
