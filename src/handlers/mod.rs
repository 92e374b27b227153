//! Event handling.

pub mod dispatcher;

pub use dispatcher::{Command, ShortcutDispatcher};
