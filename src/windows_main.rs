//! Windows entry point: hidden owner window, tray icon and the message loop.

use std::cell::Cell;

use anyhow::{bail, Context, Result};
use tracing::{error, info, warn};
use windows::core::w;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::RemoteDesktop::{
    WTSRegisterSessionNotification, WTSUnRegisterSessionNotification, NOTIFY_FOR_THIS_SESSION,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostQuitMessage, RegisterClassW, TranslateMessage, MSG, WM_COMMAND, WM_DESTROY, WM_HOTKEY,
    WM_WTSSESSION_CHANGE, WNDCLASSW, WS_EX_TOOLWINDOW, WS_POPUP,
};

use wincenter::events::{self, AppEvent};
use wincenter::handlers::ShortcutDispatcher;
use wincenter::input::{HotkeyRegistrar, KeyboardMonitor};
use wincenter::model::{ShortcutConfiguration, APP_NAME};
use wincenter::platform::windows::ui::tray;
use wincenter::platform::windows::{
    from_hwnd, TrayCommand, TrayIcon, Win32Desktop, Win32HotkeyBackend, Win32KeyState,
    Win32KeyboardHook, WM_TRAYICON, WM_WAKE,
};
use wincenter::storage::ConfigStore;
use wincenter::window::{WindowDirectory, WindowPositioner};

thread_local! {
    // Set by the window procedure on lock/unlock; the loop resets the monitor.
    static SESSION_CHANGED: Cell<bool> = const { Cell::new(false) };
}

/// Hidden window that receives hotkey, tray, session and wake-up messages.
struct OwnerWindow {
    hwnd: HWND,
}

impl OwnerWindow {
    fn create() -> Result<Self> {
        unsafe {
            let instance = GetModuleHandleW(None)?;
            let class_name = w!("WindowCenterOwner");

            let wc = WNDCLASSW {
                lpfnWndProc: Some(wndproc),
                hInstance: instance.into(),
                lpszClassName: class_name,
                ..Default::default()
            };
            if RegisterClassW(&wc) == 0 {
                bail!("RegisterClassW failed");
            }

            let hwnd = CreateWindowExW(
                WS_EX_TOOLWINDOW,
                class_name,
                w!("Window Center"),
                WS_POPUP,
                0,
                0,
                0,
                0,
                None,
                None,
                Some(instance.into()),
                None,
            )
            .context("Failed to create owner window")?;

            // Key releases made while locked never reach the hook.
            if let Err(e) = WTSRegisterSessionNotification(hwnd, NOTIFY_FOR_THIS_SESSION) {
                warn!("Session notifications unavailable: {}", e);
            }

            Ok(Self { hwnd })
        }
    }
}

impl Drop for OwnerWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = WTSUnRegisterSessionNotification(self.hwnd);
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

fn load_configuration() -> ShortcutConfiguration {
    match ConfigStore::default_location() {
        Ok(store) => store.load_or_create(),
        Err(e) => {
            warn!("{}; using default shortcuts", e);
            ShortcutConfiguration::default()
        }
    }
}

pub fn run() -> Result<()> {
    let config = load_configuration();
    let [primary, secondary, tertiary] = config.chords();
    info!("Shortcuts: {}, {}, {}", primary, secondary, tertiary);

    events::init_event_bus();
    let publisher = events::publisher().context("Event bus unavailable")?;

    // Guards drop in reverse order: monitor, hotkeys, tray, window.
    let owner = OwnerWindow::create()?;
    let hwnd = owner.hwnd;
    let _tray = TrayIcon::install(hwnd).context("Failed to install tray icon")?;

    let mut registrar = HotkeyRegistrar::new(Win32HotkeyBackend::new(hwnd));
    let bindings = registrar.register_with_fallback(primary, secondary, tertiary);

    let mut dispatcher = ShortcutDispatcher::new(&config);
    dispatcher.bind_hotkeys(&bindings);

    let mut monitor =
        KeyboardMonitor::new(Win32KeyboardHook::new(hwnd), config.chords(), publisher)
            .with_key_state(Win32KeyState);
    if let Err(e) = monitor.install() {
        error!("{}; continuing with registered hotkeys only", e);
    }

    let desktop = Win32Desktop::new();
    let positioner = WindowPositioner::new(&desktop, Some(from_hwnd(hwnd)));

    info!("{} running", APP_NAME);
    let mut msg = MSG::default();
    unsafe {
        // GetMessageW returns -1 on failure
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);

            if SESSION_CHANGED.with(Cell::take) {
                monitor.reset();
            }

            let pending = events::drain_events();
            if !pending.is_empty() {
                dispatcher.dispatch(&pending, &positioner);
            }
        }
    }

    info!("{} exiting", APP_NAME);
    Ok(())
}

extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_HOTKEY => {
                events::publish(AppEvent::HotkeyPressed(wparam.0 as i32));
                LRESULT(0)
            }

            WM_TRAYICON => {
                if tray::opens_menu(lparam) {
                    let desktop = Win32Desktop::new();
                    let directory = WindowDirectory::new(&desktop, Some(from_hwnd(hwnd)));
                    TrayIcon::show_menu(hwnd, &directory);
                }
                LRESULT(0)
            }

            WM_COMMAND => {
                match tray::menu_command(wparam.0 & 0xFFFF) {
                    Some(TrayCommand::Exit) => {
                        info!("Exit selected from tray menu");
                        PostQuitMessage(0);
                    }
                    Some(TrayCommand::Publish(event)) => events::publish(event),
                    None => {}
                }
                LRESULT(0)
            }

            WM_WTSSESSION_CHANGE => {
                SESSION_CHANGED.with(|changed| changed.set(true));
                LRESULT(0)
            }

            // Only wakes GetMessageW; the loop drains the bus afterwards.
            WM_WAKE => LRESULT(0),

            WM_DESTROY => {
                PostQuitMessage(0);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
