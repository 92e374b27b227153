//! Modifier press/release tracking.

use crate::model::{ModifierKey, Modifiers, Side};

/// Which modifier keys are physically held right now.
///
/// Left and right keys are tracked separately so that releasing one side
/// while the other is still down keeps the logical modifier held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    held: u8,
}

impl ModifierState {
    pub fn new() -> Self {
        Self::default()
    }

    fn bit(modifier: ModifierKey, side: Side) -> u8 {
        let index = match modifier {
            ModifierKey::Ctrl => 0,
            ModifierKey::Alt => 2,
            ModifierKey::Shift => 4,
            ModifierKey::Meta => 6,
        };
        let offset = match side {
            Side::Left => 0,
            Side::Right => 1,
        };
        1 << (index + offset)
    }

    pub fn update(&mut self, modifier: ModifierKey, side: Side, pressed: bool) {
        let bit = Self::bit(modifier, side);
        if pressed {
            self.held |= bit;
        } else {
            self.held &= !bit;
        }
    }

    /// True while either side of `modifier` is down.
    pub fn is_held(&self, modifier: ModifierKey) -> bool {
        let both = Self::bit(modifier, Side::Left) | Self::bit(modifier, Side::Right);
        self.held & both != 0
    }

    pub fn ctrl(&self) -> bool {
        self.is_held(ModifierKey::Ctrl)
    }

    pub fn alt(&self) -> bool {
        self.is_held(ModifierKey::Alt)
    }

    pub fn shift(&self) -> bool {
        self.is_held(ModifierKey::Shift)
    }

    pub fn meta(&self) -> bool {
        self.is_held(ModifierKey::Meta)
    }

    /// Logical modifiers for chord matching.
    pub fn to_modifiers(&self) -> Modifiers {
        Modifiers {
            ctrl: self.ctrl(),
            alt: self.alt(),
            shift: self.shift(),
            meta: self.meta(),
        }
    }

    pub fn clear(&mut self) {
        self.held = 0;
    }
}
