//! Window directory: the focused window and the list of visible windows.
//!
//! Results are never cached. Window sets change between any two calls, so
//! every listing re-enumerates and records are built lazily while iterating.

use std::ops::ControlFlow;

use tracing::debug;

use super::system::{WindowAttributes, WindowSystem};
use super::WindowHandle;
use crate::error::WindowError;
use crate::model::{Rect, UNKNOWN_PROCESS_NAME};

/// One visible application window at the time it was listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub handle: WindowHandle,
    pub title: String,
    pub process_id: u32,
    pub process_name: String,
    pub rect: Rect,
}

/// Queries over the OS window list.
pub struct WindowDirectory<'a, S: WindowSystem + ?Sized> {
    system: &'a S,
    own_window: Option<WindowHandle>,
}

impl<'a, S: WindowSystem + ?Sized> WindowDirectory<'a, S> {
    /// `own_window` is the utility's hidden window; it is never listed.
    pub fn new(system: &'a S, own_window: Option<WindowHandle>) -> Self {
        Self { system, own_window }
    }

    pub fn own_window(&self) -> Option<WindowHandle> {
        self.own_window
    }

    /// The focused top-level window, `None` during desktop transitions.
    pub fn foreground_window(&self) -> Option<WindowHandle> {
        self.system.foreground_window().filter(|h| !h.is_null())
    }

    /// Lazily list visible, titled, captioned application windows.
    ///
    /// The returned iterator is one-shot; call again for a fresh listing.
    pub fn list_visible_windows(&self) -> VisibleWindows<'a, S> {
        let mut handles = Vec::new();
        self.system.enumerate_windows(&mut |handle| {
            handles.push(handle);
            ControlFlow::Continue(())
        });
        debug!("Enumerated {} top-level windows", handles.len());

        VisibleWindows {
            system: self.system,
            own_window: self.own_window,
            handles: handles.into_iter(),
        }
    }

    pub fn attributes(&self, handle: WindowHandle) -> Result<WindowAttributes, WindowError> {
        self.system.window_attributes(handle)
    }

    pub fn rect(&self, handle: WindowHandle) -> Result<Rect, WindowError> {
        self.system.window_rect(handle)
    }
}

/// One-shot iterator over [`WindowRecord`]s, built from a single enumeration.
pub struct VisibleWindows<'a, S: WindowSystem + ?Sized> {
    system: &'a S,
    own_window: Option<WindowHandle>,
    handles: std::vec::IntoIter<WindowHandle>,
}

impl<S: WindowSystem + ?Sized> VisibleWindows<'_, S> {
    fn record(&self, handle: WindowHandle) -> Result<Option<WindowRecord>, WindowError> {
        let attributes = self.system.window_attributes(handle)?;
        if !attributes.is_listable() {
            return Ok(None);
        }

        let rect = self.system.window_rect(handle)?;
        let process_id = self.system.window_process_id(handle)?;
        let process_name = self
            .system
            .process_name(process_id)
            .unwrap_or_else(|| UNKNOWN_PROCESS_NAME.to_string());

        Ok(Some(WindowRecord {
            handle,
            title: attributes.title,
            process_id,
            process_name,
            rect,
        }))
    }
}

impl<S: WindowSystem + ?Sized> Iterator for VisibleWindows<'_, S> {
    type Item = WindowRecord;

    fn next(&mut self) -> Option<WindowRecord> {
        while let Some(handle) = self.handles.next() {
            if Some(handle) == self.own_window {
                continue;
            }
            match self.record(handle) {
                Ok(Some(record)) => return Some(record),
                Ok(None) => {}
                // Closed between enumeration and query
                Err(e) => debug!("Skipping window {}: {}", handle, e),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.handles.len()))
    }
}
