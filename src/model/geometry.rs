//! Screen geometry and the centering formula (pure Rust, no FFI).

use std::fmt;

/// A window rectangle in virtual-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build from edge coordinates, as Win32 `RECT` reports them.
    pub const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Same size, new origin.
    pub const fn moved_to(&self, left: i32, top: i32) -> Self {
        Self::new(left, top, self.width, self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} at ({}, {})",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Usable region of one display (excludes the taskbar and other reserved chrome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WorkArea {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl WorkArea {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// True when `rect` lies entirely inside this work area.
    pub const fn contains(&self, rect: &Rect) -> bool {
        rect.left >= self.left
            && rect.top >= self.top
            && rect.right() <= self.right
            && rect.bottom() <= self.bottom
    }
}

impl fmt::Display for WorkArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Top-left corner that centers a `width` x `height` window in `work`.
///
/// Uses floor division, so an odd leftover pixel goes to the right/bottom and
/// a window larger than the work area gets a negative offset rounded down.
pub const fn centered_origin(work: &WorkArea, width: i32, height: i32) -> (i32, i32) {
    let x = work.left + (work.width() - width).div_euclid(2);
    let y = work.top + (work.height() - height).div_euclid(2);
    (x, y)
}

/// `window` moved so that it is centered in `work`, size unchanged.
pub const fn centered_in(work: &WorkArea, window: &Rect) -> Rect {
    let (x, y) = centered_origin(work, window.width, window.height);
    window.moved_to(x, y)
}
