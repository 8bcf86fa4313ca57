//! Coordinate mapping between normalized preference space and the drawing
//! surface, plus the point-in-polygon test used for the passable region.
//!
//! Preference space is the unit square with Y increasing upward. Canvas space
//! is a square of side `size` pixels with a uniform `pad` margin and Y
//! increasing downward.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MIDPOINT, POLYGON_EPSILON};

/// Clamp `value` to `[0, 1]`. NaN has no position on an axis and reads as
/// [`MIDPOINT`], the same as a missing coordinate.
#[must_use]
pub fn unit_interval(value: f64) -> f64 {
    if value.is_nan() { MIDPOINT } else { value.clamp(0.0, 1.0) }
}

/// A point in either unit (preference) space or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components clamped to `[0, 1]` via [`unit_interval`].
    #[must_use]
    pub fn clamped_unit(self) -> Self {
        Self { x: unit_interval(self.x), y: unit_interval(self.y) }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Affine mapping between the unit square and a padded square canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Side length of the canvas in pixels.
    pub size: f64,
    /// Margin on every side, in pixels.
    pub pad: f64,
}

impl Projection {
    #[must_use]
    pub fn new(size: f64, pad: f64) -> Self {
        Self { size, pad }
    }

    /// Side length of the drawable area inside the padding.
    #[must_use]
    pub fn inner(&self) -> f64 {
        self.size - 2.0 * self.pad
    }

    /// Convert a unit-space point to canvas pixels, flipping Y.
    #[must_use]
    pub fn to_canvas(&self, unit: Point) -> Point {
        let inner = self.inner();
        Point { x: self.pad + unit.x * inner, y: self.pad + (1.0 - unit.y) * inner }
    }

    /// Convert canvas pixels back to unit space, clamped to `[0, 1]` on both axes.
    #[must_use]
    pub fn from_canvas(&self, canvas: Point) -> Point {
        let inner = self.inner();
        Point { x: (canvas.x - self.pad) / inner, y: 1.0 - (canvas.y - self.pad) / inner }.clamped_unit()
    }
}

/// Ray-casting point-in-polygon test over a closed vertex loop.
///
/// An edge counts as crossed when exactly one endpoint lies strictly above the
/// test point's Y (half-open span) and the edge's X at that height lies to the
/// right of the point. Malformed or degenerate polygons are not rejected; they
/// yield whatever the crossing parity says. Fewer than one vertex is never inside.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let Some(mut prev) = polygon.last().copied() else {
        return inside;
    };
    for &curr in polygon {
        let spans = (curr.y > point.y) != (prev.y > point.y);
        if spans {
            let dy = prev.y - curr.y;
            let dy = if dy.abs() < POLYGON_EPSILON { POLYGON_EPSILON } else { dy };
            let x_cross = (prev.x - curr.x) * (point.y - curr.y) / dy + curr.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        prev = curr;
    }
    inside
}
