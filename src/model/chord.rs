//! Key chords: a base key plus a set of modifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::keys::{Key, ModifierKey};
use crate::error::{ChordParseError, ChordValidationError};

/// Set of logical modifiers held together with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Returns a copy with `modifier` added.
    pub const fn with(mut self, modifier: ModifierKey) -> Self {
        match modifier {
            ModifierKey::Ctrl => self.ctrl = true,
            ModifierKey::Alt => self.alt = true,
            ModifierKey::Shift => self.shift = true,
            ModifierKey::Meta => self.meta = true,
        }
        self
    }

    pub fn contains(self, modifier: ModifierKey) -> bool {
        match modifier {
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Shift => self.shift,
            ModifierKey::Meta => self.meta,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Modifiers::NONE
    }
}

/// A key plus modifiers, evaluated as one trigger.
///
/// Serialized as its display string, e.g. `"Ctrl+Alt+C"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyChord {
    key: Key,
    modifiers: Modifiers,
}

impl KeyChord {
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// A global shortcut must carry at least one modifier.
    pub fn validate(&self) -> Result<(), ChordValidationError> {
        if self.modifiers.is_empty() {
            return Err(ChordValidationError::NoModifier(*self));
        }
        Ok(())
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in ModifierKey::ALL {
            if self.modifiers.contains(modifier) {
                write!(f, "{}+", modifier.name())?;
            }
        }
        f.write_str(self.key.name())
    }
}

impl FromStr for KeyChord {
    type Err = ChordParseError;

    /// Accepts `+`-separated tokens in any modifier order, with optional spaces:
    /// `"Ctrl+Alt+C"`, `"alt + ctrl + c"`, `"Shift+Ctrl+F11"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ChordParseError::Empty);
        }

        let mut modifiers = Modifiers::NONE;
        let mut key: Option<Key> = None;

        for token in s.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(ChordParseError::EmptySegment);
            }
            if let Some(modifier) = ModifierKey::parse(token) {
                if modifiers.contains(modifier) {
                    return Err(ChordParseError::DuplicateModifier(token.to_string()));
                }
                modifiers = modifiers.with(modifier);
                continue;
            }
            if key.is_some() {
                return Err(ChordParseError::MultipleKeys(token.to_string()));
            }
            key = Some(token.parse()?);
        }

        key.map(|key| KeyChord::new(key, modifiers))
            .ok_or(ChordParseError::MissingKey)
    }
}

impl TryFrom<String> for KeyChord {
    type Error = ChordParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyChord> for String {
    fn from(chord: KeyChord) -> Self {
        chord.to_string()
    }
}
