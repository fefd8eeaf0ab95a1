//! Port for the external record API collaborator.

use crate::record::domain::{AdrDetail, AdrNumber, AdrSummary, StatusLabel, TransitionIntent};
use crate::request::CancelAware;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Result type for record API operations.
pub type RecordApiResult<T> = Result<T, RecordApiError>;

/// External record API contract.
///
/// Implementations are expected to honour the cancellation token where one
/// is passed, by aborting the transport-level operation and returning
/// [`RecordApiError::Cancelled`]. Callers never rely on that: stale results
/// are suppressed locally by the controllers regardless.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordApi: Send + Sync {
    /// Lists record summaries, optionally filtered by a search query.
    ///
    /// # Errors
    ///
    /// Returns [`RecordApiError::Request`] on a non-success response,
    /// [`RecordApiError::Transport`] when the server is unreachable, or
    /// [`RecordApiError::Cancelled`] when the token fires first.
    async fn list_records<'a>(
        &self,
        query: Option<&'a str>,
        cancel: &CancellationToken,
    ) -> RecordApiResult<Vec<AdrSummary>>;

    /// Fetches one record in full.
    ///
    /// # Errors
    ///
    /// Returns [`RecordApiError::NotFound`] when no record carries the
    /// number, otherwise as [`Self::list_records`].
    async fn get_record(
        &self,
        number: AdrNumber,
        cancel: &CancellationToken,
    ) -> RecordApiResult<AdrDetail>;

    /// Fetches the open set of valid status labels.
    ///
    /// # Errors
    ///
    /// Returns [`RecordApiError::Request`] on a non-success response or
    /// [`RecordApiError::Transport`] when the server is unreachable.
    async fn list_statuses(&self) -> RecordApiResult<Vec<StatusLabel>>;

    /// Applies a status transition and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`RecordApiError::NotFound`] when no record carries the
    /// number, otherwise as [`Self::list_records`].
    async fn update_status(
        &self,
        number: AdrNumber,
        intent: &TransitionIntent,
    ) -> RecordApiResult<AdrDetail>;
}

/// The record API operation a failure belongs to, phrased for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    /// Listing record summaries.
    ListRecords,
    /// Fetching one record.
    GetRecord,
    /// Fetching the status set.
    ListStatuses,
    /// Submitting a status transition.
    UpdateStatus,
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ListRecords => "fetch ADRs",
            Self::GetRecord => "fetch ADR",
            Self::ListStatuses => "fetch statuses",
            Self::UpdateStatus => "update status",
        })
    }
}

/// Errors returned by record API implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordApiError {
    /// No record carries the requested number.
    #[error("ADR #{0} not found")]
    NotFound(AdrNumber),

    /// The operation was cancelled. Internal only: absorbed inside the
    /// request-lifecycle boundary and never rendered.
    #[error("request cancelled")]
    Cancelled,

    /// The server could not be reached at all.
    #[error("Network error: unable to reach server")]
    Transport,

    /// The server answered with a non-success status.
    #[error("Failed to {action}: {status}")]
    Request {
        /// Operation the failure belongs to.
        action: ApiAction,
        /// HTTP status code of the response.
        status: u16,
    },

    /// A failure value with no recognisable message.
    #[error("Unknown error")]
    Unrecognized,
}

impl RecordApiError {
    /// Renders the error for direct display to the user.
    ///
    /// [`RecordApiError::Cancelled`] is filtered out upstream by the request
    /// lifecycle; should one slip through, it renders as the unknown-error
    /// fallback rather than exposing the cancellation signal.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Cancelled => Self::Unrecognized.to_string(),
            other => other.to_string(),
        }
    }
}

impl CancelAware for RecordApiError {
    fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
