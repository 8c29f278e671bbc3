use serde::{Deserialize, Serialize};

use crate::structs2d::{Coordinate2D, Size2D};

/// Axis-aligned rectangle: top-left origin plus extent.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
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

    pub fn from_origin_size(origin: Coordinate2D, size: Size2D) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.width(),
            h: size.height(),
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Inclusive AABB overlap test. Touching edges count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }
}
