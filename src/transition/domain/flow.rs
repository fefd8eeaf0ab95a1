//! State of the status-transition workflow.

use crate::record::domain::{AdrNumber, StatusLabel};

/// Where the transition workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionFlow {
    /// No transition is underway.
    Viewing,
    /// The supersede panel is open, awaiting a superseding record.
    AwaitingTarget {
        /// The target chosen so far, if any; confirmation requires one.
        chosen: Option<AdrNumber>,
    },
    /// An update is in flight; the status control is disabled and busy.
    Submitting,
}

/// Inline feedback shown next to the status control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Transient confirmation; cleared automatically after the feedback
    /// window.
    Success(String),
    /// Sticky failure text; persists until the next user action.
    Error(String),
}

/// Snapshot of the transition machine published to the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionSnapshot {
    /// Last status the collaborator confirmed.
    pub confirmed: StatusLabel,
    /// Status currently shown by the control; tracks the optimistic apply
    /// and rolls back to `confirmed` on failure or cancellation.
    pub selected: StatusLabel,
    /// Current workflow position.
    pub flow: TransitionFlow,
    /// Inline feedback, if any.
    pub feedback: Option<Feedback>,
}

impl TransitionSnapshot {
    /// Whether an update is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.flow, TransitionFlow::Submitting)
    }

    /// Whether the supersede panel is open.
    #[must_use]
    pub const fn panel_open(&self) -> bool {
        matches!(self.flow, TransitionFlow::AwaitingTarget { .. })
    }

    /// The chosen superseding record, when the panel is open.
    #[must_use]
    pub const fn chosen_target(&self) -> Option<AdrNumber> {
        match self.flow {
            TransitionFlow::AwaitingTarget { chosen } => chosen,
            TransitionFlow::Viewing | TransitionFlow::Submitting => None,
        }
    }
}
