//! Error types.
//!
//! Every error here is recoverable: the worst outcome is a lost trigger path or a
//! skipped centering attempt, reported through `tracing`.

use thiserror::Error;

use crate::input::hotkeys::HotkeyId;
use crate::model::KeyChord;
use crate::window::WindowHandle;

/// The OS refused to attach the low-level keyboard hook.
///
/// The monitor path is lost; hotkey registration and the tray menu still work.
#[derive(Debug, Error)]
#[error("Failed to install keyboard hook: {reason}")]
pub struct HookInstallError {
    pub reason: String,
}

impl HookInstallError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A single global hotkey registration (or release) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to register hotkey {id} ({chord}): {reason}")]
pub struct HotkeyRegistrationError {
    pub id: HotkeyId,
    pub chord: KeyChord,
    pub reason: String,
}

/// Failures while querying or moving a window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// An attribute of a live window could not be read.
    #[error("Failed to query {what} of window {handle}")]
    Query {
        handle: WindowHandle,
        what: &'static str,
    },

    /// The window was closed after its handle was obtained.
    #[error("Window {0} no longer exists")]
    StaleHandle(WindowHandle),

    #[error("Failed to move window {handle}: {reason}")]
    Move {
        handle: WindowHandle,
        reason: String,
    },
}

impl WindowError {
    /// Returns the window the failure refers to.
    pub fn handle(&self) -> WindowHandle {
        match self {
            WindowError::Query { handle, .. } => *handle,
            WindowError::StaleHandle(handle) => *handle,
            WindowError::Move { handle, .. } => *handle,
        }
    }
}

/// Errors from parsing a chord such as `"Ctrl+Alt+C"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChordParseError {
    #[error("Shortcut is empty")]
    Empty,

    #[error("Shortcut contains an empty segment")]
    EmptySegment,

    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Modifier listed twice: {0}")]
    DuplicateModifier(String),

    #[error("Shortcut has more than one key: {0}")]
    MultipleKeys(String),

    #[error("Shortcut has no key, only modifiers")]
    MissingKey,
}

/// A chord that parses but cannot be used as a global shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChordValidationError {
    #[error("Shortcut {0} needs at least one modifier key (Ctrl, Alt, Shift or Win)")]
    NoModifier(KeyChord),
}

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No configuration directory available on this system")]
    NoConfigDir,
}
