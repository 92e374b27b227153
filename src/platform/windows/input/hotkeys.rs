//! `RegisterHotKey` backend for the hotkey registrar.

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    MOD_SHIFT, MOD_WIN,
};

use crate::error::HotkeyRegistrationError;
use crate::input::{HotkeyBackend, HotkeyId};
use crate::model::{KeyChord, Modifiers};

fn to_win32(modifiers: Modifiers) -> HOT_KEY_MODIFIERS {
    let mut flags = MOD_NOREPEAT;
    if modifiers.ctrl {
        flags |= MOD_CONTROL;
    }
    if modifiers.alt {
        flags |= MOD_ALT;
    }
    if modifiers.shift {
        flags |= MOD_SHIFT;
    }
    if modifiers.meta {
        flags |= MOD_WIN;
    }
    flags
}

/// Binds hotkeys to the owner window; presses arrive there as `WM_HOTKEY`.
pub struct Win32HotkeyBackend {
    owner: HWND,
}

impl Win32HotkeyBackend {
    pub fn new(owner: HWND) -> Self {
        Self { owner }
    }
}

impl HotkeyBackend for Win32HotkeyBackend {
    fn register(&mut self, id: HotkeyId, chord: KeyChord) -> Result<(), HotkeyRegistrationError> {
        unsafe {
            RegisterHotKey(
                Some(self.owner),
                id,
                to_win32(chord.modifiers()),
                chord.key().vk(),
            )
        }
        .map_err(|e| HotkeyRegistrationError {
            id,
            chord,
            reason: e.message(),
        })
    }

    fn unregister(
        &mut self,
        id: HotkeyId,
        chord: KeyChord,
    ) -> Result<(), HotkeyRegistrationError> {
        unsafe { UnregisterHotKey(Some(self.owner), id) }.map_err(|e| HotkeyRegistrationError {
            id,
            chord,
            reason: e.message(),
        })
    }
}
