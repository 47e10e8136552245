#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Vertical midpoints are compared in *doubled* units: a rect's center row is
//! `top + height / 2`, which is a half cell whenever `height` is odd. Working
//! with `2 * top + height` and `2 * y` keeps every comparison exact.

use serde::{Deserialize, Serialize};

/// On-screen bounds of a node.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A full-width row band: only `top` and `height` matter for placement.
    #[inline]
    pub const fn row(top: u16, height: u16) -> Self {
        Self::new(0, top, 0, height)
    }

    /// Vertical center in doubled units (`2 * top + height`).
    #[inline]
    pub const fn center_y2(&self) -> u32 {
        2 * self.y as u32 + self.height as u32
    }

    /// Distance from row `y` to the vertical center, in doubled units.
    #[inline]
    pub const fn center_distance2(&self, y: u16) -> u32 {
        (2 * y as u32).abs_diff(self.center_y2())
    }

    /// Whether row `y` lies strictly above the vertical center.
    #[inline]
    pub const fn is_above_center(&self, y: u16) -> bool {
        2 * (y as u32) < self.center_y2()
    }
}
