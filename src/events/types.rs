//! Application events for inter-module communication.
//!
//! These events represent triggers that can be published by the keyboard
//! hook, the window procedure or the tray menu and handled by the dispatcher.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use crate::input::hotkeys::HotkeyId;
use crate::model::KeyChord;
use crate::window::WindowHandle;

/// Application-level events for decoupled communication between modules.
///
/// Events flow from producers (keyboard hook, hotkeys, tray menu) through
/// the EventBus to the dispatcher, which executes the appropriate actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === Shortcut Triggers ===
    /// The keyboard hook saw a configured chord (and swallowed it).
    ChordMatched(KeyChord),

    /// The OS reported a `WM_HOTKEY` for a registered id.
    HotkeyPressed(HotkeyId),

    // === Menu Commands ===
    /// "Center Active Window" menu item.
    CenterActiveWindow,

    /// A window picked from the "Center Window" submenu.
    CenterWindow(WindowHandle),
}

impl AppEvent {
    /// Returns true for keyboard-shortcut triggers (as opposed to menu commands).
    ///
    /// Both shortcut paths may fire for the same key press; the dispatcher
    /// coalesces them.
    pub fn is_shortcut(&self) -> bool {
        matches!(self, AppEvent::ChordMatched(_) | AppEvent::HotkeyPressed(_))
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::ChordMatched(_) => "Shortcut seen by keyboard hook",
            AppEvent::HotkeyPressed(_) => "Registered hotkey pressed",
            AppEvent::CenterActiveWindow => "Center active window",
            AppEvent::CenterWindow(_) => "Center selected window",
        }
    }
}
