//! State of the supersede candidate list.

use crate::record::domain::AdrSummary;

/// Phase of the candidate list shown inside the supersede panel.
///
/// Failures here surface inside the panel only and never block the rest of
/// the detail view. A `Loaded` value with no entries is the distinct
/// "no other records available" condition, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CandidatePhase {
    /// The panel is closed or the list has been discarded.
    #[default]
    Idle,
    /// The candidate fetch is in flight.
    Loading,
    /// Candidates loaded, already excluding the record being edited.
    Loaded(Vec<AdrSummary>),
    /// The fetch failed with a displayable error.
    Errored(String),
}
