//! Capability traits for the OS window APIs.
//!
//! Queries and side effects are split so tests can record moves without
//! caring about how windows were found.

use std::ops::ControlFlow;

use super::{MonitorId, WindowHandle};
use crate::error::WindowError;
use crate::model::{Rect, WorkArea};

/// Attributes of one top-level window, read in a single query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowAttributes {
    pub title: String,
    pub visible: bool,
    /// Has a standard title bar (`WS_CAPTION`).
    pub captioned: bool,
    /// Floating toolbar style (`WS_EX_TOOLWINDOW`), never listed.
    pub tool_window: bool,
    pub minimized: bool,
    pub maximized: bool,
}

impl WindowAttributes {
    /// Visible, titled, captioned application window.
    pub fn is_listable(&self) -> bool {
        self.visible && self.captioned && !self.tool_window && !self.title.trim().is_empty()
    }
}

/// Read-only window queries.
pub trait WindowSystem {
    /// The window with keyboard focus, if any.
    fn foreground_window(&self) -> Option<WindowHandle>;

    /// Visit every top-level window until the visitor breaks.
    fn enumerate_windows(&self, visitor: &mut dyn FnMut(WindowHandle) -> ControlFlow<()>);

    fn window_attributes(&self, handle: WindowHandle) -> Result<WindowAttributes, WindowError>;

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WindowError>;

    fn window_process_id(&self, handle: WindowHandle) -> Result<u32, WindowError>;

    /// Executable name of a process, `None` if it has exited or is inaccessible.
    fn process_name(&self, pid: u32) -> Option<String>;
}

/// Display queries.
pub trait DisplaySystem {
    /// The monitor the window overlaps most (nearest one if it is off-screen).
    fn monitor_from_window(&self, handle: WindowHandle) -> Result<MonitorId, WindowError>;

    fn monitor_work_area(&self, monitor: MonitorId) -> Result<WorkArea, WindowError>;
}

/// Window side effects.
pub trait WindowManipulator {
    /// Move the window's top-left corner, keeping its size.
    fn move_window(&self, handle: WindowHandle, left: i32, top: i32) -> Result<(), WindowError>;
}

/// Everything the positioner needs from the OS.
pub trait Desktop: WindowSystem + DisplaySystem + WindowManipulator {}

impl<T: WindowSystem + DisplaySystem + WindowManipulator + ?Sized> Desktop for T {}
