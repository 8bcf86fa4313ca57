//! Hit-testing in canvas space: which vertex handle or option marker is
//! under the pointer.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::Config;
use crate::geometry::Point;
use crate::model::{DecisionOption, Dimension, OptionId, Region};

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A passable-region vertex handle, by index.
    Vertex(usize),
    /// An option marker.
    Option(OptionId),
}

/// Test which handle or marker (if any) is under `canvas_pt`.
///
/// Vertex handles take priority over option markers. Within each group the
/// nearest candidate inside its radius wins; on equal distance the lowest
/// vertex index wins, and for markers the later option wins because it is
/// drawn on top.
#[must_use]
pub fn hit_test(
    canvas_pt: Point,
    region: &Region,
    options: &[DecisionOption],
    dimensions: &[Dimension],
    config: &Config,
) -> Option<Hit> {
    let projection = config.projection();

    let mut best_vertex: Option<(usize, f64)> = None;
    for (i, &vertex) in region.points.iter().enumerate() {
        let dist = projection.to_canvas(vertex).distance_to(canvas_pt);
        if dist <= config.handle_radius_px && best_vertex.is_none_or(|(_, d)| dist < d) {
            best_vertex = Some((i, dist));
        }
    }
    if let Some((index, _)) = best_vertex {
        return Some(Hit::Vertex(index));
    }

    let mut best_option: Option<(OptionId, f64)> = None;
    for option in options {
        let marker = projection.to_canvas(option.position(dimensions));
        let dist = marker.distance_to(canvas_pt);
        if dist <= config.marker_radius_px && best_option.is_none_or(|(_, d)| dist <= d) {
            best_option = Some((option.id, dist));
        }
    }
    best_option.map(|(id, _)| Hit::Option(id))
}
