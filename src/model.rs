//! Decision model: dimensions, options, and the passable region.
//!
//! Dimensions are ordered; the first two are the map's X and Y axes. Options
//! carry a coordinate per dimension keyed by [`DimensionId`], so renaming a
//! dimension never orphans coordinates. A coordinate that was never written
//! reads as [`MIDPOINT`].
//!
//! The builders here are pure: they take immutable inputs and return fresh
//! records. Mutation is the engine's job.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_REGION, MIDPOINT, MIN_DIMENSIONS, MIN_REGION_VERTICES, POLE_HIGH, POLE_LOW};
use crate::geometry::{Point, point_in_polygon, unit_interval};
use crate::intake::{AxisCandidate, GENERIC_HIGH, GENERIC_LOW, parse_considerations};

/// Stable identifier for a dimension.
pub type DimensionId = Uuid;

/// Stable identifier for an option.
pub type OptionId = Uuid;

/// Raised when the model handed to the core is internally inconsistent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// An option holds a coordinate for a dimension that is not in the current set.
    #[error("option {option} has a coordinate for unknown dimension {dimension}")]
    UnknownDimension { option: OptionId, dimension: DimensionId },
    /// A preference lies outside `[0, 1]` or is not a number.
    #[error("dimension {dimension} has preference {value} outside [0, 1]")]
    PreferenceOutOfRange { dimension: DimensionId, value: f64 },
    /// A coordinate lies outside `[0, 1]` or is not a number.
    #[error("option {option} has coordinate {value} outside [0, 1] on dimension {dimension}")]
    CoordinateOutOfRange { option: OptionId, dimension: DimensionId, value: f64 },
    /// A region vertex lies outside the unit square or is not a number.
    #[error("region vertex {index} at ({x}, {y}) is outside the unit square")]
    VertexOutOfRange { index: usize, x: f64, y: f64 },
    /// The region has too few vertices to form a polygon.
    #[error("region has {len} vertices, at least {MIN_REGION_VERTICES} are required")]
    RegionTooSmall { len: usize },
}

/// A named trade-off scale with two pole labels and a preference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: DimensionId,
    pub name: String,
    /// Label for the low (0.0) end.
    pub left: String,
    /// Label for the high (1.0) end.
    pub right: String,
    /// Where on this axis the decision-maker wants to be, in `[0, 1]`.
    pub preference: f64,
}

impl Dimension {
    /// Create a dimension with a fresh id. `preference` is clamped to `[0, 1]`
    /// (NaN reads as the midpoint).
    #[must_use]
    pub fn new(name: impl Into<String>, left: impl Into<String>, right: impl Into<String>, preference: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            left: left.into(),
            right: right.into(),
            preference: unit_interval(preference),
        }
    }

    /// Dimension for an inferred axis, with a neutral preference.
    #[must_use]
    pub fn from_axis(axis: AxisCandidate) -> Self {
        Self::new(axis.name, axis.left, axis.right, MIDPOINT)
    }

    /// Placeholder dimension `"Dimension {n}"` (1-based) with generic poles.
    #[must_use]
    pub fn generic(n: usize) -> Self {
        Self::new(format!("Dimension {n}"), GENERIC_LOW, GENERIC_HIGH, MIDPOINT)
    }

    /// Set the preference, clamped to `[0, 1]`.
    pub fn set_preference(&mut self, preference: f64) {
        self.preference = unit_interval(preference);
    }
}

/// A candidate choice positioned on every dimension.
///
/// An empty (or whitespace-only) name means "unnamed": such options can be
/// selected and edited but never dragged on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: OptionId,
    pub name: String,
    pub notes: String,
    /// Coordinate per dimension, each in `[0, 1]`.
    pub coords: HashMap<DimensionId, f64>,
}

impl DecisionOption {
    /// Whether the option has a non-blank name.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Coordinate on `dimension`, or [`MIDPOINT`] if never set.
    #[must_use]
    pub fn coord(&self, dimension: &DimensionId) -> f64 {
        self.coords.get(dimension).copied().unwrap_or(MIDPOINT)
    }

    /// Write a coordinate, clamped to `[0, 1]`.
    pub fn set_coord(&mut self, dimension: DimensionId, value: f64) {
        self.coords.insert(dimension, unit_interval(value));
    }

    /// Position on the map plane formed by the first two dimensions.
    ///
    /// A missing axis (fewer than two dimensions) reads as [`MIDPOINT`].
    #[must_use]
    pub fn position(&self, dimensions: &[Dimension]) -> Point {
        let axis = |i: usize| dimensions.get(i).map_or(MIDPOINT, |d| self.coord(&d.id));
        Point::new(axis(0), axis(1))
    }
}

/// Name and notes used when creating an option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionTemplate {
    pub name: String,
    pub notes: String,
}

impl OptionTemplate {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), notes: String::new() }
    }
}

/// The user-drawn passable region over the first two dimensions.
///
/// Point order defines the boundary; the last point connects back to the
/// first. Self-intersection is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub points: Vec<Point>,
}

impl Region {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Whether the region has enough vertices to constrain anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.points.len() >= MIN_REGION_VERTICES
    }

    /// Membership of `point`. Vacuously true while the region is inactive.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        !self.is_active() || point_in_polygon(point, &self.points)
    }

    /// Move vertex `index`, clamped to the unit square. Returns the stored
    /// point, or `None` if the index is out of range.
    pub fn set_vertex(&mut self, index: usize, point: Point) -> Option<Point> {
        let slot = self.points.get_mut(index)?;
        *slot = point.clamped_unit();
        Some(*slot)
    }
}

/// The fixed starting region used for every new intake.
#[must_use]
pub fn default_region() -> Region {
    Region::new(DEFAULT_REGION.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

/// Starting coordinate pushed to the pole opposite `preference`.
#[must_use]
pub fn starting_coordinate(preference: f64) -> f64 {
    if preference >= MIDPOINT { POLE_LOW } else { POLE_HIGH }
}

/// Build one option from `template`, placed away from the preference on the
/// first two dimensions and at [`MIDPOINT`] on the rest.
#[must_use]
pub fn new_option(dimensions: &[Dimension], template: &OptionTemplate) -> DecisionOption {
    let coords = dimensions
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let value = if i < 2 { starting_coordinate(d.preference) } else { MIDPOINT };
            (d.id, value)
        })
        .collect();
    DecisionOption { id: Uuid::new_v4(), name: template.name.clone(), notes: template.notes.clone(), coords }
}

/// Build one option per template, in template order.
#[must_use]
pub fn init_options(dimensions: &[Dimension], templates: &[OptionTemplate]) -> Vec<DecisionOption> {
    templates.iter().map(|t| new_option(dimensions, t)).collect()
}

/// Turn inferred axes into dimensions, padding with generic ones up to
/// [`MIN_DIMENSIONS`].
#[must_use]
pub fn dimensions_from_axes(axes: Vec<AxisCandidate>) -> Vec<Dimension> {
    let mut dims: Vec<Dimension> = axes.into_iter().map(Dimension::from_axis).collect();
    while dims.len() < MIN_DIMENSIONS {
        dims.push(Dimension::generic(dims.len() + 1));
    }
    dims
}

/// Parse raw considerations straight into a padded dimension set.
#[must_use]
pub fn build_dimensions_from_considerations(raw: &str) -> Vec<Dimension> {
    dimensions_from_axes(parse_considerations(raw))
}

/// Built-in dimension set used when intake text yields no axes.
#[must_use]
pub fn default_dimensions() -> Vec<Dimension> {
    vec![
        Dimension::new("Work-life", "All work", "All life", 0.7),
        Dimension::new("Money", "Lower", "Higher", 0.6),
        Dimension::new("Growth", "Stable", "Expansive", 0.65),
        Dimension::new("Meaning", "Instrumental", "Purposeful", 0.8),
    ]
}

/// Verify every option coordinate refers to a dimension in `dimensions`.
///
/// # Errors
///
/// Returns [`ModelError::UnknownDimension`] for the first orphaned coordinate.
pub fn check_consistency(dimensions: &[Dimension], options: &[DecisionOption]) -> Result<(), ModelError> {
    for option in options {
        if let Some(orphan) = option.coords.keys().find(|id| !dimensions.iter().any(|d| d.id == **id)) {
            return Err(ModelError::UnknownDimension { option: option.id, dimension: *orphan });
        }
    }
    Ok(())
}

fn in_unit(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Verify every stored value honors its range: preferences and coordinates
/// in `[0, 1]`, region vertices in the unit square, and at least
/// [`MIN_REGION_VERTICES`] of them.
///
/// # Errors
///
/// Returns the first violation found. NaN fails every range check.
pub fn check_ranges(dimensions: &[Dimension], options: &[DecisionOption], region: &Region) -> Result<(), ModelError> {
    if let Some(d) = dimensions.iter().find(|d| !in_unit(d.preference)) {
        return Err(ModelError::PreferenceOutOfRange { dimension: d.id, value: d.preference });
    }
    for option in options {
        if let Some((dimension, value)) = option.coords.iter().find(|(_, v)| !in_unit(**v)) {
            return Err(ModelError::CoordinateOutOfRange { option: option.id, dimension: *dimension, value: *value });
        }
    }
    if !region.is_active() {
        return Err(ModelError::RegionTooSmall { len: region.points.len() });
    }
    if let Some((index, p)) = region.points.iter().enumerate().find(|(_, p)| !(in_unit(p.x) && in_unit(p.y))) {
        return Err(ModelError::VertexOutOfRange { index, x: p.x, y: p.y });
    }
    Ok(())
}
