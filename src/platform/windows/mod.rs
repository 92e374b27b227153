//! Win32 implementations of the capability traits.
//!
//! - desktop.rs: window, monitor and process queries, window moves
//! - input: `WH_KEYBOARD_LL` hook, `GetAsyncKeyState` and `RegisterHotKey` backends
//! - ui: tray icon and context menu

pub mod desktop;
pub mod input;
pub mod ui;

pub use desktop::{from_hwnd, to_hwnd, Win32Desktop};
pub use input::{Win32HotkeyBackend, Win32KeyState, Win32KeyboardHook, WM_WAKE};
pub use ui::{TrayCommand, TrayIcon, WM_TRAYICON};
