//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: x grows to the right, y grows downward. Traffic drives
//! toward increasing y.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An integer axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: IVec2,
    /// Width and height (both positive)
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            min: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.min.y
    }

    /// Exclusive right edge
    #[inline]
    pub fn right(&self) -> i32 {
        self.min.x.saturating_add(self.size.x)
    }

    /// Exclusive bottom edge
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.min.y.saturating_add(self.size.y)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow the rectangle by `margin` on the left and right sides
    pub fn expand_x(&self, margin: i32) -> Rect {
        Rect::new(
            self.min.x - margin,
            self.min.y,
            self.size.x + 2 * margin,
            self.size.y,
        )
    }

    /// Move the rectangle down by `dy`
    pub fn translate_y(&mut self, dy: i32) {
        self.min.y = self.min.y.saturating_add(dy);
    }
}
