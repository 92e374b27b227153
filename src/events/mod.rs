//! Event plumbing between the input sources and the dispatcher.
//!
//! ```text
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Keyboard hook │   │   WM_HOTKEY   │   │   Tray menu   │
//! └───────┬───────┘   └───────┬───────┘   └───────┬───────┘
//!         │ publish()         │ publish()         │ publish()
//!         ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                EventBus (mpsc channel)              │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │       ShortcutDispatcher (Win32 message loop)       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! - [`types`]: `AppEvent`
//! - [`bus`]: `EventBus` and `EventPublisher`
//! - [`global`]: the process-wide bus used from Win32 callbacks

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish, publisher};
pub use types::AppEvent;
