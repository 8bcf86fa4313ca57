use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError};
use crate::consts::DEFAULT_OPTION_NAMES;
use crate::geometry::Point;
use crate::hit::{Hit, hit_test};
use crate::input::{Button, InputState, UiState};
use crate::intake::parse_considerations;
use crate::model::{
    DecisionOption, Dimension, DimensionId, ModelError, OptionId, OptionTemplate, Region, check_consistency, check_ranges,
    default_dimensions, default_region, dimensions_from_axes, init_options, new_option,
};
use crate::scoring::{OptionStatus, compute_status, top_n};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers and edits for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectionChanged(Option<OptionId>),
    OptionMoved { id: OptionId, position: Point },
    VertexMoved { index: usize, point: Point },
    RenderNeeded,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("option not found: {0}")]
    OptionNotFound(OptionId),
    #[error("dimension not found: {0}")]
    DimensionNotFound(DimensionId),
    #[error("vertex {index} out of range for a region of {len} points")]
    VertexOutOfRange { index: usize, len: usize },
    #[error("{field} must be finite, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("inconsistent model: {0}")]
    Model(#[from] ModelError),
}

/// Immutable copy of everything the shell persists or renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Decision title; carried through untouched.
    pub title: String,
    pub dimensions: Vec<Dimension>,
    pub options: Vec<DecisionOption>,
    pub region: Region,
    pub selected_id: Option<OptionId>,
}

/// Core engine state: the decision model plus selection and drag tracking.
///
/// Scoring and geometry stay pure functions; this type only sequences the
/// edits a shell performs and keeps selection and drag state coherent.
pub struct EngineCore {
    pub title: String,
    pub dimensions: Vec<Dimension>,
    pub options: Vec<DecisionOption>,
    pub region: Region,
    pub ui: UiState,
    pub input: InputState,
    /// Name and notes used by the next [`EngineCore::add_option`].
    pub draft: OptionTemplate,
    pub config: Config,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() {
        Ok(())
    } else {
        warn!(field, value, "rejected non-finite value");
        Err(EngineError::InvalidValue { field, value })
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty engine (built-in dimensions, no options, default region) using `config`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `config` fails [`Config::validate`].
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: Config) -> Self {
        Self {
            title: String::new(),
            dimensions: default_dimensions(),
            options: Vec::new(),
            region: default_region(),
            ui: UiState::default(),
            input: InputState::default(),
            draft: OptionTemplate::default(),
            config,
        }
    }

    // --- Intake ---

    /// Rebuild the model from a considerations dump with the default option templates.
    pub fn intake(&mut self, title: &str, raw: &str) -> Vec<Action> {
        let templates: Vec<OptionTemplate> = DEFAULT_OPTION_NAMES.iter().map(|n| OptionTemplate::named(*n)).collect();
        self.intake_with(title, raw, &templates)
    }

    /// Rebuild the model from a considerations dump.
    ///
    /// Falls back to the built-in dimension set when no axis can be inferred.
    /// Options are created from `templates` with the push-away rule, the
    /// region resets to its default shape, and the first option is selected.
    pub fn intake_with(&mut self, title: &str, raw: &str, templates: &[OptionTemplate]) -> Vec<Action> {
        let axes = parse_considerations(raw);
        let used_defaults = axes.is_empty();
        self.dimensions = if used_defaults { default_dimensions() } else { dimensions_from_axes(axes) };
        self.options = init_options(&self.dimensions, templates);
        self.region = default_region();
        self.input = InputState::Idle;
        self.title = title.to_owned();
        self.ui.selected_id = self.options.first().map(|o| o.id);

        info!(
            dimensions = self.dimensions.len(),
            options = self.options.len(),
            used_defaults,
            "intake complete"
        );
        vec![Action::SelectionChanged(self.ui.selected_id), Action::RenderNeeded]
    }

    // --- Dimension edits ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set a dimension's preference, clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidValue`] if `preference` is NaN or infinite, or
    /// [`EngineError::DimensionNotFound`] if `id` is not a current dimension.
    pub fn set_preference(&mut self, id: &DimensionId, preference: f64) -> Result<(), EngineError> {
        require_finite("preference", preference)?;
        self.dimension_mut(id)?.set_preference(preference);
        Ok(())
    }

    /// Rename a dimension. Its id, and every coordinate keyed by it, is unchanged.
    ///
    /// # Errors
    ///
    /// [`EngineError::DimensionNotFound`] if `id` is not a current dimension.
    pub fn rename_dimension(&mut self, id: &DimensionId, name: impl Into<String>) -> Result<(), EngineError> {
        self.dimension_mut(id)?.name = name.into();
        Ok(())
    }

    /// Replace a dimension's pole labels.
    ///
    /// # Errors
    ///
    /// [`EngineError::DimensionNotFound`] if `id` is not a current dimension.
    pub fn set_poles(
        &mut self,
        id: &DimensionId,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Result<(), EngineError> {
        let dim = self.dimension_mut(id)?;
        dim.left = left.into();
        dim.right = right.into();
        Ok(())
    }

    // --- Option edits ---

    /// # Errors
    ///
    /// [`EngineError::OptionNotFound`] if `id` is not a current option.
    pub fn set_option_name(&mut self, id: &OptionId, name: impl Into<String>) -> Result<(), EngineError> {
        self.option_mut(id)?.name = name.into();
        Ok(())
    }

    /// # Errors
    ///
    /// [`EngineError::OptionNotFound`] if `id` is not a current option.
    pub fn set_option_notes(&mut self, id: &OptionId, notes: impl Into<String>) -> Result<(), EngineError> {
        self.option_mut(id)?.notes = notes.into();
        Ok(())
    }

    /// Write one coordinate of an option, clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidValue`] if `value` is NaN or infinite,
    /// [`EngineError::DimensionNotFound`] if `dimension` is not a current
    /// dimension (writing it would orphan the coordinate), or
    /// [`EngineError::OptionNotFound`] if `id` is not a current option.
    pub fn set_coordinate(&mut self, id: &OptionId, dimension: &DimensionId, value: f64) -> Result<(), EngineError> {
        require_finite("coordinate", value)?;
        if !self.dimensions.iter().any(|d| d.id == *dimension) {
            warn!(%dimension, "set_coordinate: unknown dimension");
            return Err(EngineError::DimensionNotFound(*dimension));
        }
        self.option_mut(id)?.set_coord(*dimension, value);
        Ok(())
    }

    /// Set the name and notes used by the next [`EngineCore::add_option`].
    pub fn set_draft(&mut self, draft: OptionTemplate) {
        self.draft = draft;
    }

    /// Create an option from the draft, place it away from the current
    /// preferences, and select it. The draft is cleared afterwards.
    pub fn add_option(&mut self) -> (OptionId, Vec<Action>) {
        let draft = std::mem::take(&mut self.draft);
        let option = new_option(&self.dimensions, &draft);
        let id = option.id;
        self.options.push(option);
        self.ui.selected_id = Some(id);
        debug!(%id, options = self.options.len(), "option added");
        (id, vec![Action::SelectionChanged(Some(id)), Action::RenderNeeded])
    }

    /// Remove an option.
    ///
    /// Removing the selected option moves the selection to the first remaining
    /// option, or to none if the list is now empty. Removing the option being
    /// dragged ends the drag.
    ///
    /// # Errors
    ///
    /// [`EngineError::OptionNotFound`] if `id` is not a current option.
    pub fn remove_option(&mut self, id: &OptionId) -> Result<(DecisionOption, Vec<Action>), EngineError> {
        let Some(pos) = self.options.iter().position(|o| o.id == *id) else {
            warn!(%id, "remove_option: unknown option");
            return Err(EngineError::OptionNotFound(*id));
        };
        let removed = self.options.remove(pos);
        let mut actions = Vec::new();

        if self.input == (InputState::DraggingOption { id: *id }) {
            self.input = InputState::Idle;
        }
        if self.ui.selected_id == Some(*id) {
            self.ui.selected_id = self.options.first().map(|o| o.id);
            debug!(removed = %id, selected = ?self.ui.selected_id, "selection reassigned");
            actions.push(Action::SelectionChanged(self.ui.selected_id));
        }
        actions.push(Action::RenderNeeded);
        Ok((removed, actions))
    }

    // --- Region edits ---

    /// Move a region vertex, clamped to the unit square. Returns the stored point.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidValue`] if either component is NaN or infinite, or
    /// [`EngineError::VertexOutOfRange`] if `index` is past the last vertex.
    pub fn set_vertex(&mut self, index: usize, point: Point) -> Result<Point, EngineError> {
        require_finite("vertex x", point.x)?;
        require_finite("vertex y", point.y)?;
        let len = self.region.points.len();
        self.region.set_vertex(index, point).ok_or_else(|| {
            warn!(index, len, "set_vertex: index out of range");
            EngineError::VertexOutOfRange { index, len }
        })
    }

    // --- Selection ---

    /// Select an option, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// [`EngineError::OptionNotFound`] if `id` is not a current option.
    pub fn select(&mut self, id: Option<OptionId>) -> Result<Vec<Action>, EngineError> {
        if let Some(id) = id {
            if self.option(&id).is_none() {
                return Err(EngineError::OptionNotFound(id));
            }
        }
        if self.ui.selected_id == id {
            return Ok(Vec::new());
        }
        self.ui.selected_id = id;
        Ok(vec![Action::SelectionChanged(id), Action::RenderNeeded])
    }

    // --- Input events ---

    /// Pointer-down in canvas pixels. Only the primary button interacts.
    pub fn on_pointer_down(&mut self, canvas_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        match hit_test(canvas_pt, &self.region, &self.options, &self.dimensions, &self.config) {
            Some(hit) => self.press(hit),
            None => Vec::new(),
        }
    }

    /// Pointer-down on a known target.
    ///
    /// An option target is always selected; it only starts a drag when named.
    /// A vertex target always starts a drag.
    pub fn press(&mut self, hit: Hit) -> Vec<Action> {
        let mut actions = Vec::new();
        let named = match hit {
            Hit::Vertex(_) => false,
            Hit::Option(id) => {
                let Some(option) = self.option(&id) else {
                    warn!(%id, "press: unknown option");
                    return actions;
                };
                let named = option.is_named();
                if self.ui.selected_id != Some(id) {
                    self.ui.selected_id = Some(id);
                    actions.push(Action::SelectionChanged(Some(id)));
                    actions.push(Action::RenderNeeded);
                }
                named
            }
        };
        self.input = InputState::press(hit, named);
        if self.input.is_dragging() {
            debug!(state = ?self.input, "drag started");
        }
        actions
    }

    /// Pointer-move in canvas pixels. Updates the drag target, if any.
    ///
    /// Dragging an option writes only its first two coordinates.
    pub fn on_pointer_move(&mut self, canvas_pt: Point) -> Vec<Action> {
        let unit = self.config.projection().from_canvas(canvas_pt);
        let state = self.input;
        match state {
            InputState::Idle => Vec::new(),
            InputState::DraggingVertex { index } => match self.region.set_vertex(index, unit) {
                Some(point) => vec![Action::VertexMoved { index, point }, Action::RenderNeeded],
                None => {
                    warn!(index, "drag target vertex vanished; ending drag");
                    self.input = InputState::Idle;
                    Vec::new()
                }
            },
            InputState::DraggingOption { id } => {
                let Some(option) = self.options.iter_mut().find(|o| o.id == id) else {
                    warn!(%id, "drag target option vanished; ending drag");
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                if let Some(x_dim) = self.dimensions.first() {
                    option.set_coord(x_dim.id, unit.x);
                }
                if let Some(y_dim) = self.dimensions.get(1) {
                    option.set_coord(y_dim.id, unit.y);
                }
                let position = option.position(&self.dimensions);
                vec![Action::OptionMoved { id, position }, Action::RenderNeeded]
            }
        }
    }

    /// Pointer-up anywhere: commit the last position and return to idle.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.end_drag("pointer up")
    }

    /// Pointer left the canvas: same as releasing.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.end_drag("pointer left canvas")
    }

    fn end_drag(&mut self, reason: &'static str) -> Vec<Action> {
        let prev = self.input.release();
        if prev.is_dragging() {
            debug!(state = ?prev, reason, "drag ended");
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// Derived status of every option, recomputed from current state.
    #[must_use]
    pub fn status(&self) -> HashMap<OptionId, OptionStatus> {
        compute_status(&self.dimensions, &self.options, &self.region, &self.config.scoring)
    }

    /// The `n` highest-scoring options, ties in insertion order.
    #[must_use]
    pub fn top_n(&self, n: usize) -> Vec<&DecisionOption> {
        top_n(&self.options, &self.status(), n)
    }

    #[must_use]
    pub fn selection(&self) -> Option<OptionId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&DecisionOption> {
        self.options.iter().find(|o| o.id == *id)
    }

    #[must_use]
    pub fn dimension(&self, id: &DimensionId) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.id == *id)
    }

    // --- Snapshots ---

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            title: self.title.clone(),
            dimensions: self.dimensions.clone(),
            options: self.options.clone(),
            region: self.region.clone(),
            selected_id: self.ui.selected_id,
        }
    }

    /// Replace the model with a shell-provided snapshot.
    ///
    /// A selection pointing at a missing option falls back to the first option.
    ///
    /// # Errors
    ///
    /// [`EngineError::Model`] if an option has a coordinate for a dimension the
    /// snapshot does not contain, if a preference, coordinate, or vertex lies
    /// outside `[0, 1]` (NaN included), or if the region has fewer than three
    /// vertices. The engine is left unchanged in that case.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Result<(), EngineError> {
        check_consistency(&snapshot.dimensions, &snapshot.options)?;
        check_ranges(&snapshot.dimensions, &snapshot.options, &snapshot.region)?;
        let Snapshot { title, dimensions, options, region, selected_id } = snapshot;
        let selected_exists = selected_id.is_some_and(|id| options.iter().any(|o| o.id == id));
        self.ui.selected_id = if selected_exists { selected_id } else { options.first().map(|o| o.id) };
        if selected_id.is_some() && !selected_exists {
            warn!(?selected_id, "snapshot selection missing; reassigned");
        }
        self.title = title;
        self.dimensions = dimensions;
        self.options = options;
        self.region = region;
        self.input = InputState::Idle;
        Ok(())
    }

    // --- Lookup helpers ---

    fn option_mut(&mut self, id: &OptionId) -> Result<&mut DecisionOption, EngineError> {
        let found = self.options.iter_mut().find(|o| o.id == *id);
        if found.is_none() {
            warn!(%id, "unknown option");
        }
        found.ok_or(EngineError::OptionNotFound(*id))
    }

    fn dimension_mut(&mut self, id: &DimensionId) -> Result<&mut Dimension, EngineError> {
        let found = self.dimensions.iter_mut().find(|d| d.id == *id);
        if found.is_none() {
            warn!(%id, "unknown dimension");
        }
        found.ok_or(EngineError::DimensionNotFound(*id))
    }
}
