//! Scoring: how close each option sits to the stated preference, whether it
//! falls inside the passable region, and the composite score used to rank.
//!
//! Everything here is a pure function of its inputs. Callers recompute on
//! every relevant change instead of caching.

#[cfg(test)]
#[path = "scoring_test.rs"]
mod scoring_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{DecisionOption, Dimension, OptionId, Region};

/// Score multiplier for options inside the passable region.
pub const DEFAULT_INSIDE_FACTOR: f64 = 1.0;

/// Score multiplier for options outside the passable region.
pub const DEFAULT_OUTSIDE_FACTOR: f64 = 0.75;

/// Which dimensions take part in the distance-to-preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceScope {
    /// Root-mean-square over every dimension.
    #[default]
    All,
    /// Root-mean-square over the first two (map) dimensions only.
    Primary,
}

/// Tunable constants of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub inside_factor: f64,
    pub outside_factor: f64,
    pub distance_scope: DistanceScope,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            inside_factor: DEFAULT_INSIDE_FACTOR,
            outside_factor: DEFAULT_OUTSIDE_FACTOR,
            distance_scope: DistanceScope::All,
        }
    }
}

impl ScoreWeights {
    /// Combine a distance and a region verdict into a score.
    #[must_use]
    pub fn score(&self, distance: f64, inside: bool) -> f64 {
        let factor = if inside { self.inside_factor } else { self.outside_factor };
        (1.0 - distance) * factor
    }
}

/// Derived, never-persisted status of one option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionStatus {
    /// Root-mean-square distance between coordinates and preferences, in `[0, 1]`.
    pub distance: f64,
    /// Whether the option's map position lies in the passable region.
    pub inside: bool,
    pub score: f64,
}

/// Root-mean-square of `coordinate - preference` over the dimensions in `scope`.
///
/// Missing coordinates read as the midpoint. With no participating
/// dimensions the distance is `0.0`.
#[must_use]
pub fn distance(option: &DecisionOption, dimensions: &[Dimension], scope: DistanceScope) -> f64 {
    let used = match scope {
        DistanceScope::All => dimensions,
        DistanceScope::Primary => &dimensions[..dimensions.len().min(2)],
    };
    if used.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = used
        .iter()
        .map(|d| {
            let diff = option.coord(&d.id) - d.preference;
            diff * diff
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let n = used.len() as f64;
    (sum_sq / n).sqrt()
}

/// Status of a single option.
#[must_use]
pub fn option_status(
    option: &DecisionOption,
    dimensions: &[Dimension],
    region: &Region,
    weights: &ScoreWeights,
) -> OptionStatus {
    let distance = distance(option, dimensions, weights.distance_scope);
    let inside = region.contains(option.position(dimensions));
    OptionStatus { distance, inside, score: weights.score(distance, inside) }
}

/// Status of every option, keyed by option id.
#[must_use]
pub fn compute_status(
    dimensions: &[Dimension],
    options: &[DecisionOption],
    region: &Region,
    weights: &ScoreWeights,
) -> HashMap<OptionId, OptionStatus> {
    options
        .iter()
        .map(|o| (o.id, option_status(o, dimensions, region, weights)))
        .collect()
}

/// The `n` best options by descending score.
///
/// The sort is stable, so equal scores keep their input order. An option
/// with no status entry ranks as score `0.0`; a non-finite score ranks last.
#[must_use]
pub fn top_n<'a>(
    options: &'a [DecisionOption],
    status: &HashMap<OptionId, OptionStatus>,
    n: usize,
) -> Vec<&'a DecisionOption> {
    let score_of = |o: &DecisionOption| match status.get(&o.id).map_or(0.0, |s| s.score) {
        s if s.is_finite() => s,
        _ => f64::NEG_INFINITY,
    };
    let mut ranked: Vec<&DecisionOption> = options.iter().collect();
    ranked.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
    ranked.truncate(n);
    ranked
}
