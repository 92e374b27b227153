//! Shortcut configuration (pure Rust, no FFI).
//!
//! This module defines the user-assignable shortcuts that can be
//! serialized to/from the JSON config file.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::chord::KeyChord;
use super::constants::*;

/// The three user-configurable "center window" shortcuts, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfiguration {
    /// Primary shortcut, registered first.
    pub center_window_key1: KeyChord,
    /// Fallback when the primary is taken by another program.
    pub center_window_key2: KeyChord,
    /// Last fallback.
    pub center_window_key3: KeyChord,
}

impl Default for ShortcutConfiguration {
    fn default() -> Self {
        Self {
            center_window_key1: DEFAULT_CENTER_KEY1,
            center_window_key2: DEFAULT_CENTER_KEY2,
            center_window_key3: DEFAULT_CENTER_KEY3,
        }
    }
}

impl ShortcutConfiguration {
    /// Shortcuts in registration priority order.
    pub fn chords(&self) -> [KeyChord; 3] {
        [
            self.center_window_key1,
            self.center_window_key2,
            self.center_window_key3,
        ]
    }

    /// Replaces every shortcut without a modifier by that slot's default.
    ///
    /// Returns true when something was replaced.
    pub fn validate(&mut self) -> bool {
        let defaults = ShortcutConfiguration::default();
        let slots = [
            (&mut self.center_window_key1, defaults.center_window_key1),
            (&mut self.center_window_key2, defaults.center_window_key2),
            (&mut self.center_window_key3, defaults.center_window_key3),
        ];

        let mut replaced = false;
        for (slot, fallback) in slots {
            if let Err(e) = slot.validate() {
                warn!("{e}; using {fallback} instead");
                *slot = fallback;
                replaced = true;
            }
        }
        replaced
    }
}
