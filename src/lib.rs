//! Library half of `wincenter`. Everything outside `platform` is plain Rust
//! behind capability traits, so it builds and tests on any host.

pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod model;
pub mod platform;
pub mod storage;
pub mod window;

pub use events::{AppEvent, EventBus, EventPublisher};
pub use model::{KeyChord, ShortcutConfiguration};
pub use window::{CenterOutcome, WindowHandle, WindowPositioner};
