//! Engine configuration: canvas geometry, hit radii, and scoring weights.
//!
//! Every field has a default, so an empty JSON object is a valid config.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::geometry::Projection;
use crate::scoring::ScoreWeights;

pub const DEFAULT_CANVAS_SIZE: f64 = 520.0;
pub const DEFAULT_CANVAS_PAD: f64 = 36.0;
pub const DEFAULT_HANDLE_RADIUS_PX: f64 = 8.0;
pub const DEFAULT_MARKER_RADIUS_PX: f64 = 10.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("canvas size {size} leaves no room inside padding {pad}")]
    InvalidCanvas { size: f64, pad: f64 },
    #[error("{name} must be positive, got {value}")]
    InvalidRadius { name: &'static str, value: f64 },
    #[error("invalid scoring weights: {0}")]
    InvalidWeights(String),
}

/// Square drawing surface the unit square is projected onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Side length in pixels.
    pub size: f64,
    /// Uniform margin in pixels.
    pub pad: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { size: DEFAULT_CANVAS_SIZE, pad: DEFAULT_CANVAS_PAD }
    }
}

impl CanvasConfig {
    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection::new(self.size, self.pad)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    /// Hit slop around polygon vertex handles, in canvas pixels.
    pub handle_radius_px: f64,
    /// Hit slop around option markers, in canvas pixels.
    pub marker_radius_px: f64,
    pub scoring: ScoreWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            handle_radius_px: DEFAULT_HANDLE_RADIUS_PX,
            marker_radius_px: DEFAULT_MARKER_RADIUS_PX,
            scoring: ScoreWeights::default(),
        }
    }
}

impl Config {
    /// Parse a JSON config; absent fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any error from
    /// [`Config::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values describe a usable canvas and a monotonic score.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasConfig { size, pad } = self.canvas;
        if !(pad >= 0.0 && size > 2.0 * pad) {
            return Err(ConfigError::InvalidCanvas { size, pad });
        }
        if self.handle_radius_px.is_nan() || self.handle_radius_px <= 0.0 {
            return Err(ConfigError::InvalidRadius { name: "handle_radius_px", value: self.handle_radius_px });
        }
        if self.marker_radius_px.is_nan() || self.marker_radius_px <= 0.0 {
            return Err(ConfigError::InvalidRadius { name: "marker_radius_px", value: self.marker_radius_px });
        }
        let ScoreWeights { inside_factor, outside_factor, .. } = self.scoring;
        let unit = 0.0..=1.0;
        if !unit.contains(&inside_factor) || !unit.contains(&outside_factor) {
            return Err(ConfigError::InvalidWeights(format!(
                "factors must lie in [0, 1] (inside {inside_factor}, outside {outside_factor})"
            )));
        }
        if outside_factor > inside_factor {
            return Err(ConfigError::InvalidWeights(format!(
                "outside factor {outside_factor} exceeds inside factor {inside_factor}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn projection(&self) -> Projection {
        self.canvas.projection()
    }
}
