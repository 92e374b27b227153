//! The centering algorithm.
//!
//! ```text
//! target window -> current rect -> work area of its display -> centered rect -> move
//! ```
//!
//! Every step can fail when the window closes mid-operation; the failure aborts
//! only this invocation and is returned to the caller for logging.

use tracing::{debug, info};

use super::directory::WindowDirectory;
use super::display::DisplayResolver;
use super::system::Desktop;
use super::WindowHandle;
use crate::error::WindowError;
use crate::model::{centered_in, Rect};

/// Why a centering request was ignored without touching any window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing has focus (desktop switch, lock screen).
    NoForegroundWindow,
    /// The focused window is the utility's own hidden window.
    OwnWindow,
    /// Untitled windows are system surfaces, not worth repositioning.
    UntitledWindow,
    Minimized,
    Maximized,
}

/// Result of one centering request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterOutcome {
    Moved {
        handle: WindowHandle,
        from: Rect,
        to: Rect,
    },
    /// The window already sat at the centered position; no move was issued.
    AlreadyCentered { handle: WindowHandle, rect: Rect },
    Skipped(SkipReason),
}

impl CenterOutcome {
    /// Final rectangle of the window, if one was placed.
    pub fn placed_rect(&self) -> Option<Rect> {
        match self {
            CenterOutcome::Moved { to, .. } => Some(*to),
            CenterOutcome::AlreadyCentered { rect, .. } => Some(*rect),
            CenterOutcome::Skipped(_) => None,
        }
    }
}

/// Centers windows on the monitor they currently occupy.
pub struct WindowPositioner<'a, D: Desktop + ?Sized> {
    desktop: &'a D,
    directory: WindowDirectory<'a, D>,
    displays: DisplayResolver<'a, D>,
}

impl<'a, D: Desktop + ?Sized> WindowPositioner<'a, D> {
    pub fn new(desktop: &'a D, own_window: Option<WindowHandle>) -> Self {
        Self {
            desktop,
            directory: WindowDirectory::new(desktop, own_window),
            displays: DisplayResolver::new(desktop),
        }
    }

    pub fn directory(&self) -> &WindowDirectory<'a, D> {
        &self.directory
    }

    /// Center the focused window.
    pub fn center_active_window(&self) -> Result<CenterOutcome, WindowError> {
        match self.directory.foreground_window() {
            Some(handle) => self.center(handle),
            None => {
                debug!("No foreground window to center");
                Ok(CenterOutcome::Skipped(SkipReason::NoForegroundWindow))
            }
        }
    }

    /// Center a window picked from a listing; the handle may have gone stale.
    pub fn center_specific_window(
        &self,
        handle: WindowHandle,
    ) -> Result<CenterOutcome, WindowError> {
        if handle.is_null() {
            return Err(WindowError::StaleHandle(handle));
        }
        self.center(handle)
    }

    fn center(&self, handle: WindowHandle) -> Result<CenterOutcome, WindowError> {
        if Some(handle) == self.directory.own_window() {
            return Ok(CenterOutcome::Skipped(SkipReason::OwnWindow));
        }

        let attributes = self.directory.attributes(handle)?;
        let skip = if attributes.title.trim().is_empty() {
            Some(SkipReason::UntitledWindow)
        } else if attributes.minimized {
            Some(SkipReason::Minimized)
        } else if attributes.maximized {
            // A maximized window's rect is the work area plus its hidden frame;
            // moving it would only detach it from the maximized layout.
            Some(SkipReason::Maximized)
        } else {
            None
        };
        if let Some(reason) = skip {
            debug!("Not centering window {}: {:?}", handle, reason);
            return Ok(CenterOutcome::Skipped(reason));
        }

        let from = self.directory.rect(handle)?;
        let work = self.displays.resolve_work_area(handle)?;
        let to = centered_in(&work, &from);

        if to == from {
            debug!("Window {} already centered at {}", handle, from);
            return Ok(CenterOutcome::AlreadyCentered { handle, rect: from });
        }

        self.desktop.move_window(handle, to.left, to.top)?;
        info!(
            "Centered \"{}\" ({}) from {} to {}",
            attributes.title, handle, from, to
        );
        Ok(CenterOutcome::Moved { handle, from, to })
    }
}
