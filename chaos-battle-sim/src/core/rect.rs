//! Axis-Aligned Rectangles
//!
//! Playfield geometry. Coordinates follow the drawing surface: origin at the
//! top-left corner, x grows right, y grows down.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point as (x, y).
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1} {}x{}]", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(100.0, 300.0, 40.0, 40.0);
        assert_eq!(r.right(), 140.0);
        assert_eq!(r.bottom(), 340.0);
        assert_eq!(r.center(), (120.0, 320.0));
    }

    #[test]
    fn test_rect_overlap() {
        let player = Rect::new(100.0, 300.0, 40.0, 40.0);
        let bullet = Rect::new(135.0, 315.0, 10.0, 5.0);
        assert!(player.overlaps(&bullet));
        assert!(bullet.overlaps(&player));
    }

    #[test]
    fn test_rect_touching_edges_do_not_overlap() {
        let player = Rect::new(100.0, 300.0, 40.0, 40.0);
        let left_of = Rect::new(90.0, 315.0, 10.0, 5.0);
        let above = Rect::new(110.0, 295.0, 10.0, 5.0);
        assert!(!player.overlaps(&left_of));
        assert!(!player.overlaps(&above));
    }

    #[test]
    fn test_rect_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(500.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }
}
