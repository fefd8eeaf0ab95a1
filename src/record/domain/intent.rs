//! Status-transition payloads sent to the update collaborator.

use super::{AdrNumber, StatusLabel};
use serde::{Deserialize, Serialize};

/// The payload eventually submitted to the update collaborator.
///
/// The `supersededBy` wire field is omitted entirely, not serialised as
/// null, when no superseding record is named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionIntent {
    /// Status the record should move to.
    #[serde(rename = "status")]
    pub target_status: StatusLabel,
    /// Record that supersedes this one; present only on the supersede path.
    #[serde(rename = "supersededBy", skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<AdrNumber>,
}

impl TransitionIntent {
    /// Intent for a direct transition with no superseding record.
    #[must_use]
    pub const fn direct(target_status: StatusLabel) -> Self {
        Self {
            target_status,
            superseded_by: None,
        }
    }

    /// Intent marking the record as superseded by `target`.
    #[must_use]
    pub fn supersede(target: AdrNumber) -> Self {
        Self {
            target_status: StatusLabel::superseded(),
            superseded_by: Some(target),
        }
    }
}
