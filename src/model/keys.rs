//! Base keys and modifier keys with their Windows virtual-key codes.
//!
//! Virtual-key codes are plain numbers, so this module stays free of FFI and
//! is shared by the hook, the hotkey backend and the config parser.

use std::fmt;
use std::str::FromStr;

use crate::error::ChordParseError;

macro_rules! define_keys {
    ($($variant:ident = $vk:literal, $name:literal;)*) => {
        /// A non-modifier key that can end a chord.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant,)*
        }

        impl Key {
            /// Every key, in declaration order.
            pub const ALL: &'static [Key] = &[$(Key::$variant,)*];

            /// Windows virtual-key code.
            pub fn vk(self) -> u32 {
                match self {
                    $(Key::$variant => $vk,)*
                }
            }

            /// Canonical display name (used in config files and menus).
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name,)*
                }
            }

            /// Map a virtual-key code back to a key. Modifiers return `None`.
            pub fn from_vk(vk: u32) -> Option<Key> {
                match vk {
                    $($vk => Some(Key::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

define_keys! {
    A = 0x41, "A"; B = 0x42, "B"; C = 0x43, "C"; D = 0x44, "D";
    E = 0x45, "E"; F = 0x46, "F"; G = 0x47, "G"; H = 0x48, "H";
    I = 0x49, "I"; J = 0x4A, "J"; K = 0x4B, "K"; L = 0x4C, "L";
    M = 0x4D, "M"; N = 0x4E, "N"; O = 0x4F, "O"; P = 0x50, "P";
    Q = 0x51, "Q"; R = 0x52, "R"; S = 0x53, "S"; T = 0x54, "T";
    U = 0x55, "U"; V = 0x56, "V"; W = 0x57, "W"; X = 0x58, "X";
    Y = 0x59, "Y"; Z = 0x5A, "Z";

    Digit0 = 0x30, "0"; Digit1 = 0x31, "1"; Digit2 = 0x32, "2"; Digit3 = 0x33, "3";
    Digit4 = 0x34, "4"; Digit5 = 0x35, "5"; Digit6 = 0x36, "6"; Digit7 = 0x37, "7";
    Digit8 = 0x38, "8"; Digit9 = 0x39, "9";

    F1 = 0x70, "F1"; F2 = 0x71, "F2"; F3 = 0x72, "F3"; F4 = 0x73, "F4";
    F5 = 0x74, "F5"; F6 = 0x75, "F6"; F7 = 0x76, "F7"; F8 = 0x77, "F8";
    F9 = 0x78, "F9"; F10 = 0x79, "F10"; F11 = 0x7A, "F11"; F12 = 0x7B, "F12";
    F13 = 0x7C, "F13"; F14 = 0x7D, "F14"; F15 = 0x7E, "F15"; F16 = 0x7F, "F16";
    F17 = 0x80, "F17"; F18 = 0x81, "F18"; F19 = 0x82, "F19"; F20 = 0x83, "F20";
    F21 = 0x84, "F21"; F22 = 0x85, "F22"; F23 = 0x86, "F23"; F24 = 0x87, "F24";

    Numpad0 = 0x60, "Numpad0"; Numpad1 = 0x61, "Numpad1"; Numpad2 = 0x62, "Numpad2";
    Numpad3 = 0x63, "Numpad3"; Numpad4 = 0x64, "Numpad4"; Numpad5 = 0x65, "Numpad5";
    Numpad6 = 0x66, "Numpad6"; Numpad7 = 0x67, "Numpad7"; Numpad8 = 0x68, "Numpad8";
    Numpad9 = 0x69, "Numpad9";

    Backspace = 0x08, "Backspace";
    Tab = 0x09, "Tab";
    Enter = 0x0D, "Enter";
    Pause = 0x13, "Pause";
    Escape = 0x1B, "Escape";
    Space = 0x20, "Space";
    PageUp = 0x21, "PageUp";
    PageDown = 0x22, "PageDown";
    End = 0x23, "End";
    Home = 0x24, "Home";
    Left = 0x25, "Left";
    Up = 0x26, "Up";
    Right = 0x27, "Right";
    Down = 0x28, "Down";
    PrintScreen = 0x2C, "PrintScreen";
    Insert = 0x2D, "Insert";
    Delete = 0x2E, "Delete";
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Some(key) = Key::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(token))
        {
            return Ok(key);
        }

        let lower = token.to_ascii_lowercase();
        let alias = match lower.as_str() {
            "esc" => Some(Key::Escape),
            "return" => Some(Key::Enter),
            "pgup" => Some(Key::PageUp),
            "pgdn" | "pgdown" => Some(Key::PageDown),
            "del" => Some(Key::Delete),
            "ins" => Some(Key::Insert),
            "prtsc" | "printscr" => Some(Key::PrintScreen),
            "back" => Some(Key::Backspace),
            // WinForms spells digit keys D0..D9
            d if d.len() == 2 && d.starts_with('d') => {
                d[1..].parse::<u32>().ok().and_then(|n| Key::from_vk(0x30 + n))
            }
            _ => None,
        };
        alias.ok_or_else(|| ChordParseError::UnknownKey(token.to_string()))
    }
}

/// Logical modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Ctrl,
    Alt,
    Shift,
    /// The Windows key.
    Meta,
}

impl ModifierKey {
    pub const ALL: [ModifierKey; 4] = [
        ModifierKey::Ctrl,
        ModifierKey::Alt,
        ModifierKey::Shift,
        ModifierKey::Meta,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ModifierKey::Ctrl => "Ctrl",
            ModifierKey::Alt => "Alt",
            ModifierKey::Shift => "Shift",
            ModifierKey::Meta => "Win",
        }
    }

    /// Parse a modifier token (`ctrl`, `control`, `alt`, `shift`, `win`, `meta`, `super`).
    pub fn parse(token: &str) -> Option<ModifierKey> {
        match token.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" | "ctl" => Some(ModifierKey::Ctrl),
            "alt" => Some(ModifierKey::Alt),
            "shift" => Some(ModifierKey::Shift),
            "win" | "windows" | "meta" | "super" => Some(ModifierKey::Meta),
            _ => None,
        }
    }
}

/// Which physical key of a left/right pair was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Classify a virtual-key code as a modifier.
///
/// The generic codes (`VK_SHIFT`, `VK_CONTROL`, `VK_MENU`) count as the left key;
/// low-level hooks normally report the sided codes.
pub fn modifier_from_vk(vk: u32) -> Option<(ModifierKey, Side)> {
    match vk {
        0x10 | 0xA0 => Some((ModifierKey::Shift, Side::Left)),
        0xA1 => Some((ModifierKey::Shift, Side::Right)),
        0x11 | 0xA2 => Some((ModifierKey::Ctrl, Side::Left)),
        0xA3 => Some((ModifierKey::Ctrl, Side::Right)),
        0x12 | 0xA4 => Some((ModifierKey::Alt, Side::Left)),
        0xA5 => Some((ModifierKey::Alt, Side::Right)),
        0x5B => Some((ModifierKey::Meta, Side::Left)),
        0x5C => Some((ModifierKey::Meta, Side::Right)),
        _ => None,
    }
}
