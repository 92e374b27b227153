//! `GetAsyncKeyState` backend for modifier resync.

use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, VK_LCONTROL, VK_LMENU, VK_LSHIFT, VK_LWIN, VK_RCONTROL, VK_RMENU,
    VK_RSHIFT, VK_RWIN,
};

use crate::input::{KeyState, ModifierState};
use crate::model::modifier_from_vk;

const SIDED_MODIFIERS: [u16; 8] = [
    VK_LSHIFT.0,
    VK_RSHIFT.0,
    VK_LCONTROL.0,
    VK_RCONTROL.0,
    VK_LMENU.0,
    VK_RMENU.0,
    VK_LWIN.0,
    VK_RWIN.0,
];

/// Reads the live keyboard state, so it never goes stale.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32KeyState;

impl KeyState for Win32KeyState {
    fn physical_modifiers(&self) -> ModifierState {
        let mut state = ModifierState::new();
        for vk in SIDED_MODIFIERS {
            // High bit set means the key is down.
            let down = unsafe { GetAsyncKeyState(vk as i32) } < 0;
            if let Some((modifier, side)) = modifier_from_vk(vk as u32) {
                state.update(modifier, side, down);
            }
        }
        state
    }
}
