//! Derived state of the record detail view.

use crate::record::domain::{AdrDetail, StatusLabel};

/// Phase of the detail load.
///
/// The record detail and the open status set load together under one
/// cancellation token; the view renders the dropdown from `statuses` and
/// builds the transition machine once `Ready`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    /// The load is in flight.
    Loading,
    /// Both fetches settled with data.
    Ready {
        /// The record being viewed.
        detail: AdrDetail,
        /// The open set of valid status labels.
        statuses: Vec<StatusLabel>,
    },
    /// The record does not exist; carries the display message.
    NotFound(String),
    /// Either fetch failed; carries the display message. The record
    /// failure takes precedence when both fail.
    Errored(String),
}
