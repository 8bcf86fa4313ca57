//! Input model: pointer buttons, persistent UI state, and the drag state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. Each variant carries exactly the drag target it needs, so a
//! vertex index can never coexist with an option id.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::Hit;
use crate::model::OptionId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Persistent UI state visible to the shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// The id of the currently selected option, if any.
    pub selected_id: Option<OptionId>,
}

/// Internal state for the drag state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputState {
    /// No drag in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A passable-region vertex handle follows the pointer.
    DraggingVertex {
        /// Index into the region's point list.
        index: usize,
    },
    /// A named option's map position follows the pointer.
    DraggingOption {
        /// Id of the option being dragged.
        id: OptionId,
    },
}

impl InputState {
    /// State after a pointer-down on `hit`.
    ///
    /// Vertex handles always start a drag. Options start a drag only when
    /// `option_named` is true; unnamed options leave the machine idle.
    #[must_use]
    pub fn press(hit: Hit, option_named: bool) -> Self {
        match hit {
            Hit::Vertex(index) => Self::DraggingVertex { index },
            Hit::Option(id) if option_named => Self::DraggingOption { id },
            Hit::Option(_) => Self::Idle,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// End any drag and return the state that was active.
    pub fn release(&mut self) -> Self {
        std::mem::take(self)
    }
}
