//! Event bus on top of an mpsc channel.
//!
//! - Producers (keyboard hook, window procedure, tray menu) publish through
//!   an `EventPublisher`
//! - The message loop drains everything after each dispatched message
//!
//! Publishing never blocks, which is what the keyboard hook callback requires.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use tracing::debug;

use super::types::AppEvent;

/// Queue of pending application events.
///
/// # Example
///
/// ```
/// use wincenter::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::CenterActiveWindow);
///
/// assert_eq!(bus.drain(), vec![AppEvent::CenterActiveWindow]);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A publisher handle; clone it freely.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Next pending event, without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            // The bus owns a sender, so Disconnected cannot happen while it lives
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Every pending event, in publish order.
    pub fn drain(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, thread-safe handle for publishing events.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    /// Wrap an existing sender (used by the global bus).
    pub fn from_sender(sender: Sender<AppEvent>) -> Self {
        Self { sender }
    }

    /// Enqueue an event. Never blocks.
    ///
    /// A dropped receiver means the app is shutting down; the event is discarded.
    pub fn publish(&self, event: AppEvent) {
        if self.sender.send(event).is_err() {
            debug!("Event bus closed, dropping event");
        }
    }
}
