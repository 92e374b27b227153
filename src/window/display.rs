//! Display geometry resolver.

use tracing::{debug, warn};

use super::system::DisplaySystem;
use super::WindowHandle;
use crate::error::WindowError;
use crate::model::WorkArea;

/// Finds the usable rectangle of the display a window currently occupies.
///
/// Resolved on every call; monitors can be attached, removed or rearranged
/// between two centering requests.
pub struct DisplayResolver<'a, D: DisplaySystem + ?Sized> {
    displays: &'a D,
}

impl<'a, D: DisplaySystem + ?Sized> DisplayResolver<'a, D> {
    pub fn new(displays: &'a D) -> Self {
        Self { displays }
    }

    pub fn resolve_work_area(&self, handle: WindowHandle) -> Result<WorkArea, WindowError> {
        let monitor = self.displays.monitor_from_window(handle).inspect_err(|e| {
            warn!("No monitor for window {}: {}", handle, e);
        })?;

        let work = self.displays.monitor_work_area(monitor).inspect_err(|e| {
            warn!("No work area for monitor {}: {}", monitor, e);
        })?;

        if work.is_empty() {
            warn!("Monitor {} reports an empty work area {}", monitor, work);
            return Err(WindowError::Query {
                handle,
                what: "monitor work area",
            });
        }

        debug!("Window {} is on monitor {} with work area {}", handle, monitor, work);
        Ok(work)
    }
}
