//! Derived state of the list view's search flow.

use crate::record::domain::AdrSummary;

/// Minimum number of characters, after trimming, for a query to filter the
/// listing. Shorter input fetches the unfiltered list so that single-letter
/// queries never hit the server as filters.
pub const MIN_QUERY_CHARS: usize = 2;

/// Phase of the debounced list query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryPhase {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// Input changed; the quiet period has not yet elapsed.
    Debouncing,
    /// A fetch for the current query is in flight.
    Loading,
    /// The most recent fetch settled with data.
    Loaded(Vec<AdrSummary>),
    /// The most recent fetch settled with a displayable error.
    Errored(String),
}

/// Snapshot of the list controller published to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListSnapshot {
    /// Query text exactly as typed; updated on every keystroke.
    pub query: String,
    /// Current phase of the search flow.
    pub phase: QueryPhase,
}

/// Resolves the query actually sent to the collaborator.
///
/// Returns `None`, the unfiltered path, when the trimmed input is shorter
/// than [`MIN_QUERY_CHARS`].
#[must_use]
pub fn effective_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (trimmed.chars().count() >= MIN_QUERY_CHARS).then_some(trimmed)
}
