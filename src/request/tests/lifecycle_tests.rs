//! Settlement and normalization tests for [`execute`].

use crate::record::ports::{ApiAction, RecordApiError, RecordApiResult};
use crate::request::{Outcome, execute};
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

#[rstest]
#[tokio::test]
async fn success_passes_through_when_uncancelled() {
    let token = CancellationToken::new();
    let outcome = execute(&token, async { Ok::<_, RecordApiError>(7) }).await;
    assert_eq!(outcome, Outcome::Succeeded(7));
}

#[rstest]
#[case::transport(RecordApiError::Transport)]
#[case::request(RecordApiError::Request {
    action: ApiAction::ListRecords,
    status: 500,
})]
#[case::unrecognized(RecordApiError::Unrecognized)]
#[tokio::test]
async fn failure_passes_through_when_uncancelled(#[case] err: RecordApiError) {
    let token = CancellationToken::new();
    let failing = err.clone();
    let outcome = execute(&token, async move { Err::<(), _>(failing) }).await;
    assert_eq!(outcome, Outcome::Failed(err));
}

#[rstest]
#[tokio::test]
async fn cancel_before_start_never_polls_the_operation() {
    let token = CancellationToken::new();
    token.cancel();
    let polled = Arc::new(AtomicBool::new(false));
    let probe = Arc::clone(&polled);
    let outcome = execute(&token, async move {
        probe.store(true, Ordering::SeqCst);
        Ok::<_, RecordApiError>(())
    })
    .await;

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(!polled.load(Ordering::SeqCst));
}

#[rstest]
#[tokio::test]
async fn cancel_mid_flight_settles_cancelled() {
    let token = CancellationToken::new();
    let (_held_tx, rx) = oneshot::channel::<RecordApiResult<()>>();
    let canceller = token.clone();

    let (outcome, ()) = tokio::join!(
        execute(&token, async move {
            rx.await.unwrap_or(Err(RecordApiError::Cancelled))
        }),
        async move { canceller.cancel() },
    );

    assert_eq!(outcome, Outcome::Cancelled);
}

#[rstest]
#[tokio::test]
async fn completion_racing_cancellation_normalises_to_cancelled() {
    let token = CancellationToken::new();
    let racer = token.clone();
    let outcome = execute(&token, async move {
        // Settle and cancel in the same poll: the result must not surface.
        racer.cancel();
        Ok::<_, RecordApiError>(42)
    })
    .await;

    assert_eq!(outcome, Outcome::Cancelled);
}

#[rstest]
#[tokio::test]
async fn abort_shaped_error_normalises_to_cancelled() {
    let token = CancellationToken::new();
    let outcome = execute(&token, async {
        Err::<(), _>(RecordApiError::Cancelled)
    })
    .await;

    assert_eq!(outcome, Outcome::Cancelled);
}

#[rstest]
#[tokio::test]
async fn repeated_cancellation_still_settles_exactly_once() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    let outcome = execute(&token, async { Ok::<_, RecordApiError>(()) }).await;
    assert_eq!(outcome, Outcome::Cancelled);
}
