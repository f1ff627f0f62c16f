//! Axis-aligned bounding-box collision test.
//!
//! The overlap predicate is the strict rectangle-disjunction test: two boxes
//! are disjoint iff one lies entirely beyond the other on some axis. Edges
//! that merely touch therefore count as overlapping.

/// An axis-aligned rectangle in world units (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square helper for the player and entity sprites.
    pub fn square(x: f32, y: f32, size: f32) -> Self {
        Self::new(x, y, size, size)
    }
}

/// True if the two rectangles overlap (or touch).
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !(a.x > b.x + b.w || a.x + a.w < b.x || a.y > b.y + b.h || a.y + a.h < b.y)
}
