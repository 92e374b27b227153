//! Win32 window, monitor and process queries.

use std::ffi::c_void;
use std::ops::ControlFlow;
use std::path::Path;

use tracing::debug;
use windows::core::{BOOL, PWSTR};
use windows::Win32::Foundation::{CloseHandle, HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, MonitorFromWindow, HMONITOR, MONITORINFO, MONITOR_DEFAULTTONEAREST,
};
use windows::Win32::System::Threading::{
    OpenProcess, QueryFullProcessImageNameW, PROCESS_NAME_WIN32,
    PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowLongW, GetWindowRect, GetWindowTextLengthW,
    GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, IsZoomed,
    SetWindowPos, GWL_EXSTYLE, GWL_STYLE, SWP_NOACTIVATE, SWP_NOSIZE, SWP_NOZORDER, WS_CAPTION,
    WS_EX_TOOLWINDOW,
};

use crate::error::WindowError;
use crate::model::{Rect, WorkArea};
use crate::window::{
    DisplaySystem, MonitorId, WindowAttributes, WindowHandle, WindowManipulator, WindowSystem,
};

type Visitor<'a> = &'a mut dyn FnMut(WindowHandle) -> ControlFlow<()>;

/// The live Win32 desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Desktop;

impl Win32Desktop {
    pub fn new() -> Self {
        Self
    }
}

pub fn to_hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

pub fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

/// Resolve a handle, failing with `StaleHandle` once the window is gone.
fn live_hwnd(handle: WindowHandle) -> Result<HWND, WindowError> {
    let hwnd = to_hwnd(handle);
    if handle.is_null() || !unsafe { IsWindow(Some(hwnd)) }.as_bool() {
        return Err(WindowError::StaleHandle(handle));
    }
    Ok(hwnd)
}

fn window_title(hwnd: HWND) -> String {
    unsafe {
        let len = GetWindowTextLengthW(hwnd);
        if len <= 0 {
            return String::new();
        }
        let mut buffer = vec![0u16; len as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
    }
}

unsafe extern "system" fn enum_windows_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let visitor = &mut *(lparam.0 as *mut Visitor<'_>);
    match visitor(from_hwnd(hwnd)) {
        ControlFlow::Continue(()) => true.into(),
        ControlFlow::Break(()) => false.into(),
    }
}

impl WindowSystem for Win32Desktop {
    fn foreground_window(&self) -> Option<WindowHandle> {
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then(|| from_hwnd(hwnd))
    }

    fn enumerate_windows(&self, visitor: &mut dyn FnMut(WindowHandle) -> ControlFlow<()>) {
        let mut visitor: Visitor<'_> = visitor;
        let lparam = LPARAM(&mut visitor as *mut Visitor<'_> as isize);
        // Fails (with no error code) when the visitor stops early.
        if let Err(e) = unsafe { EnumWindows(Some(enum_windows_proc), lparam) } {
            debug!("EnumWindows stopped: {}", e);
        }
    }

    fn window_attributes(&self, handle: WindowHandle) -> Result<WindowAttributes, WindowError> {
        let hwnd = live_hwnd(handle)?;
        unsafe {
            let style = GetWindowLongW(hwnd, GWL_STYLE) as u32;
            let ex_style = GetWindowLongW(hwnd, GWL_EXSTYLE) as u32;
            Ok(WindowAttributes {
                title: window_title(hwnd),
                visible: IsWindowVisible(hwnd).as_bool(),
                captioned: style & WS_CAPTION.0 == WS_CAPTION.0,
                tool_window: ex_style & WS_EX_TOOLWINDOW.0 != 0,
                minimized: IsIconic(hwnd).as_bool(),
                maximized: IsZoomed(hwnd).as_bool(),
            })
        }
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, WindowError> {
        let hwnd = live_hwnd(handle)?;
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd, &mut rect) }.map_err(|_| WindowError::Query {
            handle,
            what: "rectangle",
        })?;
        Ok(Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn window_process_id(&self, handle: WindowHandle) -> Result<u32, WindowError> {
        let hwnd = live_hwnd(handle)?;
        let mut pid = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
        if pid == 0 {
            return Err(WindowError::Query {
                handle,
                what: "process id",
            });
        }
        Ok(pid)
    }

    fn process_name(&self, pid: u32) -> Option<String> {
        unsafe {
            let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid).ok()?;
            let mut buffer = vec![0u16; 1024];
            let mut size = buffer.len() as u32;
            let queried = QueryFullProcessImageNameW(
                process,
                PROCESS_NAME_WIN32,
                PWSTR(buffer.as_mut_ptr()),
                &mut size,
            );
            let _ = CloseHandle(process);
            queried.ok()?;

            let path = String::from_utf16_lossy(&buffer[..size as usize]);
            Path::new(&path)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        }
    }
}

impl DisplaySystem for Win32Desktop {
    fn monitor_from_window(&self, handle: WindowHandle) -> Result<MonitorId, WindowError> {
        let hwnd = live_hwnd(handle)?;
        let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
        if monitor.is_invalid() {
            return Err(WindowError::Query {
                handle,
                what: "monitor",
            });
        }
        Ok(MonitorId(monitor.0 as isize))
    }

    fn monitor_work_area(&self, monitor: MonitorId) -> Result<WorkArea, WindowError> {
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let ok = unsafe { GetMonitorInfoW(HMONITOR(monitor.0 as *mut c_void), &mut info) };
        if !ok.as_bool() {
            return Err(WindowError::Query {
                handle: WindowHandle(0),
                what: "monitor info",
            });
        }
        let work = info.rcWork;
        Ok(WorkArea::new(work.left, work.top, work.right, work.bottom))
    }
}

impl WindowManipulator for Win32Desktop {
    fn move_window(&self, handle: WindowHandle, left: i32, top: i32) -> Result<(), WindowError> {
        let hwnd = live_hwnd(handle)?;
        unsafe {
            SetWindowPos(
                hwnd,
                None,
                left,
                top,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| WindowError::Move {
            handle,
            reason: e.message(),
        })
    }
}
