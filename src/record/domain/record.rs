//! Record summaries and detail views as served by the external API.

use super::{AdrNumber, StatusLabel};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the record listing.
///
/// Summaries are immutable once fetched; the list never patches a summary in
/// place but fetches a fresh copy instead. Field names match the wire format
/// of the record API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrSummary {
    /// Unique, stable record number.
    pub number: AdrNumber,
    /// Record title.
    pub title: String,
    /// Current lifecycle status.
    pub status: StatusLabel,
    /// Decision date.
    pub date: NaiveDate,
}

/// A full record: its summary plus the markdown body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrDetail {
    /// Listing fields shared with [`AdrSummary`].
    #[serde(flatten)]
    pub summary: AdrSummary,
    /// Raw markdown body. Untrusted: sanitisation before rendering is the
    /// responsibility of the presentation layer.
    pub content: String,
}

impl AdrDetail {
    /// Returns the record number.
    #[must_use]
    pub const fn number(&self) -> AdrNumber {
        self.summary.number
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> &StatusLabel {
        &self.summary.status
    }

    /// Returns the record title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.summary.title
    }
}
