//! Collision primitives
//!
//! The only geometry this game needs: a circle (the bird) against
//! axis-aligned rectangles (pipe halves, in world pixels).

use glam::Vec2;

/// Axis-aligned rectangle in world pixels, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Circle-vs-rect intersection test
///
/// Clamps the circle center to the rect bounds to find the nearest point on
/// the rect, then compares the squared distance against r². Pure function;
/// degenerate (zero-size or inverted) rects fall out of the same formula
/// rather than being special-cased.
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    // max-then-min instead of clamp: an inverted rect must not panic
    let closest = Vec2::new(
        center.x.max(rect.left).min(rect.right),
        center.y.max(rect.top).min(rect.bottom),
    );
    center.distance_squared(closest) <= radius * radius
}
