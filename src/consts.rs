//! Shared numeric constants for the trade-off map crate.

// ── Intake ──────────────────────────────────────────────────────

/// Maximum number of candidate phrases kept from one considerations dump.
pub const MAX_CANDIDATES: usize = 8;

/// Minimum number of dimensions an intake produces once any axis was inferred.
pub const MIN_DIMENSIONS: usize = 2;

/// Glyphs treated as bullet markers and turned into line breaks.
pub const BULLET_GLYPHS: [char; 2] = ['•', '·'];

// ── Model ───────────────────────────────────────────────────────

/// Preference for padded dimensions, and the read-time value of a missing coordinate.
pub const MIDPOINT: f64 = 0.5;

/// Starting coordinate when the preference sits in the upper half of an axis.
pub const POLE_LOW: f64 = 0.1;

/// Starting coordinate when the preference sits in the lower half of an axis.
pub const POLE_HIGH: f64 = 0.9;

/// Fixed starting shape of the passable region: a rounded pentagon in unit space.
pub const DEFAULT_REGION: [(f64, f64); 5] = [(0.5, 0.9), (0.88, 0.62), (0.74, 0.15), (0.26, 0.15), (0.12, 0.62)];

/// Names of the options created on every fresh intake.
pub const DEFAULT_OPTION_NAMES: [&str; 2] = ["Option A", "Option B"];

// ── Geometry ────────────────────────────────────────────────────

/// Guards the edge X-intersection division in the ray-casting test.
pub const POLYGON_EPSILON: f64 = 1e-12;

/// Minimum number of vertices for the region to constrain anything.
pub const MIN_REGION_VERTICES: usize = 3;
