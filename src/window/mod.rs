//! Window geometry resolution and centering.
//!
//! - [`system`]: capability traits for the OS window, display and move APIs
//! - [`directory`]: foreground window and visible window enumeration
//! - [`display`]: work area of the monitor a window occupies
//! - [`positioner`]: the centering algorithm
//!
//! Nothing here talks to the OS directly; `platform::windows` implements the
//! traits with Win32 and the tests use in-memory fakes.

pub mod directory;
pub mod display;
pub mod positioner;
pub mod system;

use std::fmt;

pub use directory::{VisibleWindows, WindowDirectory, WindowRecord};
pub use display::DisplayResolver;
pub use positioner::{CenterOutcome, SkipReason, WindowPositioner};
pub use system::{Desktop, DisplaySystem, WindowAttributes, WindowManipulator, WindowSystem};

/// Opaque OS window identifier (an `HWND` on Windows).
///
/// Valid only until the window closes; every query against a closed window
/// fails with `WindowError::StaleHandle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Opaque OS display identifier (an `HMONITOR` on Windows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorId(pub isize);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
