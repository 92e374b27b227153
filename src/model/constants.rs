//! Application constants and default values.
//!
//! This module contains the default shortcuts, hotkey ids, config file
//! location and user-facing strings shared by every platform layer.

use super::chord::{KeyChord, Modifiers};
use super::keys::Key;

// === Application ===

/// Display name (tray tooltip, config directory).
pub const APP_NAME: &str = "WindowCenter";

/// Config file name inside the per-user config directory.
pub const CONFIG_FILE_NAME: &str = "settings.json";

/// Environment variable read by the log filter.
pub const LOG_ENV_VAR: &str = "WINCENTER_LOG";

/// Log level used when `LOG_ENV_VAR` is unset or invalid.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// === Default Shortcuts ===

/// Ctrl+Alt+C
pub const DEFAULT_CENTER_KEY1: KeyChord = KeyChord::new(
    Key::C,
    Modifiers {
        ctrl: true,
        alt: true,
        shift: false,
        meta: false,
    },
);

/// Ctrl+Shift+F11
pub const DEFAULT_CENTER_KEY2: KeyChord = KeyChord::new(
    Key::F11,
    Modifiers {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    },
);

/// Alt+F10
pub const DEFAULT_CENTER_KEY3: KeyChord = KeyChord::new(
    Key::F10,
    Modifiers {
        ctrl: false,
        alt: true,
        shift: false,
        meta: false,
    },
);

// === Hotkey IDs ===

/// Id used for the primary shortcut registration.
pub const HOTKEY_PRIMARY: i32 = 1;

/// Id used when the primary shortcut is taken.
pub const HOTKEY_SECONDARY: i32 = 2;

/// Id used when the secondary shortcut is taken too.
pub const HOTKEY_TERTIARY: i32 = 3;

// === Window Directory ===

/// Process name reported when the owning process has already exited.
pub const UNKNOWN_PROCESS_NAME: &str = "Unknown";
