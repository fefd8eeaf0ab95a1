//! Candidate-list controller for the supersede panel.

use crate::record::domain::AdrNumber;
use crate::record::ports::RecordApi;
use crate::request::{Outcome, execute};
use crate::transition::domain::CandidatePhase;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Loads the records offered as superseding targets.
///
/// A specialisation of the list-query discipline with no debounce: every
/// load supersedes the previous one, cancellation is explicit, and stale
/// settlements are discarded. The full unfiltered listing is fetched and
/// the record being edited is excluded client-side.
pub struct SupersedeCandidateController<A: RecordApi + 'static> {
    shared: Arc<Shared<A>>,
}

struct Shared<A> {
    api: Arc<A>,
    /// The record being edited; never offered as its own replacement.
    exclude: AdrNumber,
    state: Mutex<State>,
    snapshot_tx: watch::Sender<CandidatePhase>,
}

#[derive(Default)]
struct State {
    torn_down: bool,
    request_seq: u64,
    cancel: Option<CancellationToken>,
}

impl<A: RecordApi + 'static> SupersedeCandidateController<A> {
    /// Creates a controller excluding the given record from its results.
    #[must_use]
    pub fn new(api: Arc<A>, exclude: AdrNumber) -> Self {
        let (snapshot_tx, _initial_rx) = watch::channel(CandidatePhase::Idle);
        Self {
            shared: Arc::new(Shared {
                api,
                exclude,
                state: Mutex::new(State::default()),
                snapshot_tx,
            }),
        }
    }

    /// Subscribes to phase updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CandidatePhase> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn snapshot(&self) -> CandidatePhase {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Starts or restarts the candidate fetch, superseding any previous one.
    pub fn load(&self) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        if let Some(previous) = state.cancel.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        state.cancel = Some(token.clone());
        state.request_seq += 1;
        let seq = state.request_seq;
        self.shared.snapshot_tx.send_replace(CandidatePhase::Loading);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            Shared::run_fetch(&shared, token, seq).await;
        });
    }

    /// Cancels the in-flight fetch and discards any loaded candidates.
    ///
    /// Settlement of the cancelled fetch is ignored from here on; its
    /// abort-shaped error never renders as visible text.
    pub fn cancel(&self) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        if let Some(token) = state.cancel.take() {
            token.cancel();
        }
        state.request_seq += 1;
        self.shared.snapshot_tx.send_replace(CandidatePhase::Idle);
    }

    /// As [`Self::cancel`], and permanently rejects further loads.
    pub fn teardown(&self) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        if let Some(token) = state.cancel.take() {
            token.cancel();
        }
        state.request_seq += 1;
        debug!("supersede candidate controller torn down");
    }
}

impl<A: RecordApi + 'static> Drop for SupersedeCandidateController<A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<A: RecordApi + 'static> Shared<A> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_fetch(shared: &Arc<Self>, token: CancellationToken, seq: u64) {
        let outcome = execute(&token, shared.api.list_records(None, &token)).await;
        let state = shared.lock();
        if state.torn_down || state.request_seq != seq {
            debug!(seq, "discarding settlement of superseded candidate fetch");
            return;
        }
        let phase = match outcome {
            Outcome::Succeeded(records) => CandidatePhase::Loaded(
                records
                    .into_iter()
                    .filter(|record| record.number != shared.exclude)
                    .collect(),
            ),
            Outcome::Failed(err) => CandidatePhase::Errored(err.user_message()),
            Outcome::Cancelled => return,
        };
        shared.snapshot_tx.send_replace(phase);
    }
}
