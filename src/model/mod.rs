//! Application domain model.
//!
//! This module contains pure types with no FFI dependencies: keys and
//! chords, screen geometry, the shortcut configuration and constants.
//!
//! Persistence is in `storage`, Win32 bindings in `platform::windows`.

pub mod chord;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod keys;

pub use chord::{KeyChord, Modifiers};
pub use config::ShortcutConfiguration;
pub use constants::*;
pub use geometry::{centered_in, centered_origin, Rect, WorkArea};
pub use keys::{modifier_from_vk, Key, ModifierKey, Side};
