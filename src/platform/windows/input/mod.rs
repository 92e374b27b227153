//! Win32 keyboard backends.

pub mod hotkeys;
pub mod key_state;
pub mod keyboard_hook;

pub use hotkeys::Win32HotkeyBackend;
pub use key_state::Win32KeyState;
pub use keyboard_hook::{Win32KeyboardHook, WM_WAKE};
