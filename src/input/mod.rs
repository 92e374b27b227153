//! Keyboard input: the system-wide chord monitor and OS hotkey registration.
//!
//! - modifier_state.rs: left/right modifier tracking
//! - keyboard_monitor.rs: hook-driven chord matching
//! - hotkeys.rs: prioritized `RegisterHotKey`-style bindings

pub mod hotkeys;
pub mod keyboard_monitor;
pub mod modifier_state;

pub use hotkeys::{HotkeyBackend, HotkeyBinding, HotkeyId, HotkeyRegistrar, RegistrationOutcome};
pub use keyboard_monitor::{
    ChordMatcher, HookVerdict, InstallStatus, KeyDirection, KeyHandler, KeyTransition,
    KeyState, KeyboardHook, KeyboardMonitor,
};
pub use modifier_state::ModifierState;
