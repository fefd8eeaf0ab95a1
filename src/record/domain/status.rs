//! Status labels for Architecture Decision Records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a record.
///
/// The set of valid labels is open: it is enumerated at runtime by the
/// external API rather than fixed in this crate, so the label stays an
/// opaque string. The single exception is [`StatusLabel::SUPERSEDED`], the
/// reserved label that routes a status change through the supersede
/// confirmation sub-flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLabel(String);

impl StatusLabel {
    /// The reserved label whose selection requires choosing a superseding
    /// record before submission.
    pub const SUPERSEDED: &'static str = "Superseded";

    /// Creates a status label from its display text.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the reserved superseded label.
    #[must_use]
    pub fn superseded() -> Self {
        Self::new(Self::SUPERSEDED)
    }

    /// Whether this label is the reserved superseded label.
    #[must_use]
    pub fn is_superseded(&self) -> bool {
        self.0 == Self::SUPERSEDED
    }

    /// Returns the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatusLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for StatusLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}
