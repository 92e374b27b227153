//! Process-wide event bus.
//!
//! The keyboard hook callback and the window procedure are plain `extern
//! "system"` functions with no user data pointer worth threading a bus
//! through, so they publish here. The message loop drains it.
//!
//! ```ignore
//! events::init_event_bus();
//!
//! // From the hook or window procedure:
//! events::publish(AppEvent::HotkeyPressed(1));
//!
//! // In the message loop:
//! for event in events::drain_events() { /* ... */ }
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::{debug, warn};

use super::bus::EventPublisher;
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();

// Only the message-loop thread locks this.
static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Create the global bus. Returns false (and changes nothing) if it already exists.
pub fn init_event_bus() -> bool {
    let (sender, receiver) = mpsc::channel();
    if SENDER.set(sender).is_err() {
        warn!("Event bus already initialized");
        return false;
    }
    // SENDER and RECEIVER are only ever set together, here.
    let _ = RECEIVER.set(Mutex::new(receiver));
    true
}

/// A publisher for the global bus, or `None` before `init_event_bus`.
pub fn publisher() -> Option<EventPublisher> {
    SENDER
        .get()
        .map(|sender| EventPublisher::from_sender(sender.clone()))
}

/// Publish to the global bus. Events published before initialization are dropped.
pub fn publish(event: AppEvent) {
    match SENDER.get() {
        Some(sender) => {
            let _ = sender.send(event);
        }
        None => debug!("Event bus not initialized, dropping {:?}", event),
    }
}

/// Every event published since the last drain, in order.
pub fn drain_events() -> Vec<AppEvent> {
    let Some(receiver) = RECEIVER.get() else {
        return Vec::new();
    };
    let receiver = receiver.lock().unwrap_or_else(PoisonError::into_inner);
    receiver.try_iter().collect()
}
