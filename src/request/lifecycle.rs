//! Cancellable request lifecycle wrapping a single asynchronous operation.
//!
//! Controllers hand every collaborator call to [`execute`] together with the
//! cancellation token that is current for their view. The returned
//! [`Outcome`] settles exactly once, and every cancellation shape (the token
//! firing first, the token firing while the operation completes, or the
//! collaborator returning its own abort-shaped error) normalises to
//! [`Outcome::Cancelled`] so that no cancellation signal can ever reach
//! user-visible state.

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Terminal settlement of a wrapped operation.
///
/// Exactly one variant is produced per [`execute`] call, regardless of how
/// often the token is cancelled or how the cancellation races completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The operation completed and its result may be applied.
    Succeeded(T),
    /// The operation failed with a displayable error.
    Failed(E),
    /// The operation was superseded or torn down; its settlement must be a
    /// no-op on shared state.
    Cancelled,
}

impl<T, E> Outcome<T, E> {
    /// Whether the outcome is [`Outcome::Cancelled`].
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Error types that can declare themselves to be cancellation signals.
///
/// Collaborators that honour a cancellation token report the abort through
/// their ordinary error channel; this seam lets the lifecycle recognise
/// those values and keep them out of the [`Outcome::Failed`] path.
pub trait CancelAware {
    /// Whether this error is a cancellation signal rather than a failure.
    fn is_cancellation(&self) -> bool;
}

/// Runs `operation` to a single settlement, racing it against `cancel`.
///
/// If the token fires first the operation future is dropped, which aborts
/// any transport-level work it still owns. If completion and cancellation
/// race, cancellation wins: a result produced under an already-cancelled
/// token is never surfaced.
pub async fn execute<T, E, F>(cancel: &CancellationToken, operation: F) -> Outcome<T, E>
where
    E: CancelAware,
    F: Future<Output = Result<T, E>>,
{
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            trace!("request cancelled before completion");
            return Outcome::Cancelled;
        }
        result = operation => result,
    };
    if cancel.is_cancelled() {
        trace!("request completed under a cancelled token");
        return Outcome::Cancelled;
    }
    match result {
        Ok(value) => Outcome::Succeeded(value),
        Err(err) if err.is_cancellation() => {
            trace!("collaborator reported cancellation");
            Outcome::Cancelled
        }
        Err(err) => Outcome::Failed(err),
    }
}
