//! Windows user interface: the tray icon is the only visible surface.

pub mod tray;

pub use tray::{TrayCommand, TrayIcon, WM_TRAYICON};
