//! Notification-area icon and its context menu.
//!
//! The menu is rebuilt on every click so the "Center Window" submenu always
//! lists the windows that are open right now.

use std::cell::{Cell, RefCell};

use tracing::{debug, info, warn};
use windows::core::{w, HSTRING, PCWSTR};
use windows::Win32::Foundation::{E_FAIL, HWND, LPARAM, POINT, WPARAM};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, PostMessageW,
    SetForegroundWindow, TrackPopupMenu, HMENU, IDI_APPLICATION, MF_GRAYED, MF_POPUP,
    MF_SEPARATOR, MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN, TPM_RIGHTBUTTON, WM_LBUTTONUP,
    WM_NULL, WM_RBUTTONUP, WM_USER,
};

use crate::events::AppEvent;
use crate::window::{WindowDirectory, WindowHandle, WindowRecord, WindowSystem};

/// Callback message for tray icon mouse events.
pub const WM_TRAYICON: u32 = WM_USER + 1;

pub const MENU_CENTER_ACTIVE: usize = 1001;
pub const MENU_EXIT: usize = 1002;
/// Submenu entries use `MENU_WINDOW_BASE + index`.
pub const MENU_WINDOW_BASE: usize = 2000;

const TRAY_ICON_ID: u32 = 1;
const TOOLTIP: &str = "Window Center";
const MAX_LABEL_CHARS: usize = 60;

thread_local! {
    // Windows listed in the last menu, indexed by submenu position.
    static MENU_WINDOWS: RefCell<Vec<WindowHandle>> = const { RefCell::new(Vec::new()) };
    // Focused window before the menu stole focus.
    static PREVIOUS_FOREGROUND: Cell<Option<WindowHandle>> = const { Cell::new(None) };
}

/// What a menu selection asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayCommand {
    Publish(AppEvent),
    Exit,
}

/// True for the mouse notifications that open the menu.
pub fn opens_menu(lparam: LPARAM) -> bool {
    let event = (lparam.0 as u32) & 0xFFFF;
    event == WM_RBUTTONUP || event == WM_LBUTTONUP
}

/// Map a `WM_COMMAND` id from the last menu to a command.
pub fn menu_command(id: usize) -> Option<TrayCommand> {
    let previous = PREVIOUS_FOREGROUND.with(Cell::get);
    let listed = MENU_WINDOWS.with(|w| w.borrow().clone());
    resolve_menu_id(id, &listed, previous)
}

fn resolve_menu_id(
    id: usize,
    listed: &[WindowHandle],
    previous: Option<WindowHandle>,
) -> Option<TrayCommand> {
    match id {
        MENU_EXIT => Some(TrayCommand::Exit),
        MENU_CENTER_ACTIVE => Some(TrayCommand::Publish(match previous {
            Some(handle) => AppEvent::CenterWindow(handle),
            None => AppEvent::CenterActiveWindow,
        })),
        id if id >= MENU_WINDOW_BASE => listed
            .get(id - MENU_WINDOW_BASE)
            .map(|handle| TrayCommand::Publish(AppEvent::CenterWindow(*handle))),
        _ => None,
    }
}

fn menu_label(record: &WindowRecord) -> String {
    let mut title: String = record.title.chars().take(MAX_LABEL_CHARS).collect();
    if record.title.chars().count() > MAX_LABEL_CHARS {
        title.push_str("...");
    }
    // A single '&' would underline the next character.
    format!("{} ({})", title, record.process_name).replace('&', "&&")
}

fn notify_icon_data(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        ..Default::default()
    }
}

/// The installed tray icon. Dropping it removes the icon.
pub struct TrayIcon {
    hwnd: HWND,
}

impl TrayIcon {
    pub fn install(hwnd: HWND) -> windows::core::Result<Self> {
        let mut nid = notify_icon_data(hwnd);
        nid.uFlags = NIF_ICON | NIF_MESSAGE | NIF_TIP;
        nid.uCallbackMessage = WM_TRAYICON;
        nid.hIcon = unsafe { LoadIconW(None, IDI_APPLICATION) }?;
        for (slot, c) in nid
            .szTip
            .iter_mut()
            .zip(TOOLTIP.encode_utf16().take(127))
        {
            *slot = c;
        }

        if !unsafe { Shell_NotifyIconW(NIM_ADD, &nid) }.as_bool() {
            return Err(windows::core::Error::new(E_FAIL, "Shell_NotifyIconW failed"));
        }
        info!("Tray icon installed");
        Ok(Self { hwnd })
    }

    /// Show the context menu at the cursor.
    pub fn show_menu<S: WindowSystem + ?Sized>(
        hwnd: HWND,
        directory: &WindowDirectory<'_, S>,
    ) {
        // The menu steals focus; remember who had it for "Center Active Window".
        let previous = directory
            .foreground_window()
            .filter(|handle| Some(*handle) != directory.own_window());
        PREVIOUS_FOREGROUND.with(|p| p.set(previous));

        let records: Vec<WindowRecord> = directory.list_visible_windows().collect();
        debug!("Tray menu lists {} window(s)", records.len());

        unsafe {
            let menu = match build_menu(&records) {
                Ok(menu) => menu,
                Err(e) => {
                    warn!("Failed to build tray menu: {}", e);
                    return;
                }
            };
            MENU_WINDOWS.with(|w| *w.borrow_mut() = records.iter().map(|r| r.handle).collect());

            let mut pt = POINT::default();
            let _ = GetCursorPos(&mut pt);

            // Required for the menu to close when clicking outside
            let _ = SetForegroundWindow(hwnd);
            let _ = TrackPopupMenu(
                menu.0,
                TPM_BOTTOMALIGN | TPM_LEFTALIGN | TPM_RIGHTBUTTON,
                pt.x,
                pt.y,
                None,
                hwnd,
                None,
            );
            let _ = PostMessageW(Some(hwnd), WM_NULL, WPARAM(0), LPARAM(0));
        }
    }
}

/// A popup menu that is destroyed on drop unless released.
struct OwnedMenu(HMENU);

impl OwnedMenu {
    fn new() -> windows::core::Result<Self> {
        Ok(Self(unsafe { CreatePopupMenu() }?))
    }

    /// Hand the handle over; the caller (or a parent menu) now destroys it.
    fn release(self) -> HMENU {
        let menu = self.0;
        std::mem::forget(self);
        menu
    }
}

impl Drop for OwnedMenu {
    fn drop(&mut self) {
        let _ = unsafe { DestroyMenu(self.0) };
    }
}

fn build_menu(records: &[WindowRecord]) -> windows::core::Result<OwnedMenu> {
    let menu = OwnedMenu::new()?;
    let windows_menu = OwnedMenu::new()?;

    unsafe {
        if records.is_empty() {
            AppendMenuW(windows_menu.0, MF_STRING | MF_GRAYED, 0, w!("(no windows)"))?;
        }
        for (index, record) in records.iter().enumerate() {
            AppendMenuW(
                windows_menu.0,
                MF_STRING,
                MENU_WINDOW_BASE + index,
                &HSTRING::from(menu_label(record)),
            )?;
        }

        AppendMenuW(menu.0, MF_STRING, MENU_CENTER_ACTIVE, w!("Center Active Window"))?;
        AppendMenuW(
            menu.0,
            MF_POPUP,
            windows_menu.0 .0 as usize,
            w!("Center Window"),
        )?;
        // Destroyed together with its parent from here on.
        windows_menu.release();

        AppendMenuW(menu.0, MF_SEPARATOR, 0, PCWSTR::null())?;
        AppendMenuW(menu.0, MF_STRING, MENU_EXIT, w!("Exit"))?;
    }
    Ok(menu)
}

impl Drop for TrayIcon {
    fn drop(&mut self) {
        let nid = notify_icon_data(self.hwnd);
        if unsafe { Shell_NotifyIconW(NIM_DELETE, &nid) }.as_bool() {
            debug!("Tray icon removed");
        }
        MENU_WINDOWS.with(|w| w.borrow_mut().clear());
    }
}
