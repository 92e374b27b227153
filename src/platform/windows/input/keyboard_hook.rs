//! `WH_KEYBOARD_LL` backend for the keyboard monitor.
//!
//! The hook procedure has no user-data slot, so the handler lives in a
//! thread-local that is filled only while the hook is attached. Low-level hooks
//! are called on the installing thread, which is the message-loop thread.

use std::cell::RefCell;
use std::ffi::c_void;
use std::sync::atomic::{AtomicIsize, Ordering};

use tracing::{debug, warn};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, PostMessageW, SetWindowsHookExW, UnhookWindowsHookEx, HHOOK,
    KBDLLHOOKSTRUCT, WH_KEYBOARD_LL, WM_APP, WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use crate::error::HookInstallError;
use crate::input::{HookVerdict, KeyDirection, KeyHandler, KeyTransition, KeyboardHook};

/// Posted to the owner window after a chord is swallowed so that
/// `GetMessageW` returns and the event bus gets drained.
pub const WM_WAKE: u32 = WM_APP + 1;

thread_local! {
    static HANDLER: RefCell<Option<KeyHandler>> = const { RefCell::new(None) };
}

static KEYBOARD_HOOK: AtomicIsize = AtomicIsize::new(0);
static WAKE_WINDOW: AtomicIsize = AtomicIsize::new(0);

pub struct Win32KeyboardHook {
    wake_window: HWND,
}

impl Win32KeyboardHook {
    pub fn new(wake_window: HWND) -> Self {
        Self { wake_window }
    }
}

impl KeyboardHook for Win32KeyboardHook {
    fn attach(&mut self, handler: KeyHandler) -> Result<(), HookInstallError> {
        if KEYBOARD_HOOK.load(Ordering::SeqCst) != 0 {
            return Err(HookInstallError::new("a keyboard hook is already attached"));
        }

        HANDLER.with(|slot| *slot.borrow_mut() = Some(handler));
        let hook = unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) }
            .map_err(|e| {
                HANDLER.with(|slot| slot.borrow_mut().take());
                HookInstallError::new(format!("SetWindowsHookExW failed: {}", e))
            })?;

        KEYBOARD_HOOK.store(hook.0 as isize, Ordering::SeqCst);
        WAKE_WINDOW.store(self.wake_window.0 as isize, Ordering::SeqCst);
        Ok(())
    }

    fn detach(&mut self) {
        let hook = KEYBOARD_HOOK.swap(0, Ordering::SeqCst);
        if hook != 0 {
            if let Err(e) = unsafe { UnhookWindowsHookEx(HHOOK(hook as *mut c_void)) } {
                warn!("UnhookWindowsHookEx failed: {}", e);
            }
        }
        WAKE_WINDOW.store(0, Ordering::SeqCst);
        HANDLER.with(|slot| slot.borrow_mut().take());
    }
}

fn wake_message_loop() {
    let hwnd = WAKE_WINDOW.load(Ordering::SeqCst);
    if hwnd == 0 {
        return;
    }
    let hwnd = HWND(hwnd as *mut c_void);
    if let Err(e) = unsafe { PostMessageW(Some(hwnd), WM_WAKE, WPARAM(0), LPARAM(0)) } {
        debug!("Failed to wake message loop: {}", e);
    }
}

extern "system" fn keyboard_hook_proc(ncode: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if ncode >= 0 {
        let direction = match wparam.0 as u32 {
            WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyDirection::Down),
            WM_KEYUP | WM_SYSKEYUP => Some(KeyDirection::Up),
            _ => None,
        };

        if let Some(direction) = direction {
            let info = unsafe { &*(lparam.0 as *const KBDLLHOOKSTRUCT) };
            let transition = KeyTransition {
                vk: info.vkCode,
                direction,
            };
            let verdict = HANDLER.with(|slot| match slot.try_borrow_mut() {
                Ok(mut handler) => handler.as_mut().map(|handle| handle(transition)),
                Err(_) => None,
            });

            if verdict == Some(HookVerdict::Consume) {
                wake_message_loop();
                return LRESULT(1);
            }
        }
    }

    let hook = KEYBOARD_HOOK.load(Ordering::SeqCst);
    unsafe { CallNextHookEx(Some(HHOOK(hook as *mut c_void)), ncode, wparam, lparam) }
}
