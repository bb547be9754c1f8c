//! Axis-aligned rectangles and overlap tests
//!
//! Level space: x grows rightward from the level start, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }

    /// Smallest signed push on each axis that separates `self` from `other`
    ///
    /// Returns zero when the boxes don't overlap. Each component moves `self`
    /// toward whichever side of `other` is nearer.
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        if !self.overlaps(other) {
            return Vec2::ZERO;
        }
        let push_left = other.x - self.right();
        let push_right = other.right() - self.x;
        let push_up = other.y - self.bottom();
        let push_down = other.bottom() - self.y;

        let dx = if -push_left < push_right {
            push_left
        } else {
            push_right
        };
        let dy = if -push_up < push_down {
            push_up
        } else {
            push_down
        };
        Vec2::new(dx, dy)
    }
}

/// True iff the boxes intersect with positive area
///
/// Touching edges do not count.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
