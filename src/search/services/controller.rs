//! Debounced, cancellable list-query controller.

use crate::record::ports::RecordApi;
use crate::request::{Outcome, execute};
use crate::search::domain::{ListSnapshot, QueryPhase, effective_query};
use crate::timing::InteractionTiming;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Coordinates search-as-you-type over the record listing.
///
/// The controller owns the query text, the debounce timer, and the
/// currently in-flight request. Exactly one request is current at any time;
/// starting a new one cancels the previous token, and settlement of a
/// superseded request never mutates published state. Commands spawn Tokio
/// tasks and must therefore be issued from within a runtime.
pub struct DebouncedQueryController<A: RecordApi + 'static> {
    shared: Arc<Shared<A>>,
    timing: InteractionTiming,
}

struct Shared<A> {
    api: Arc<A>,
    state: Mutex<State>,
    snapshot_tx: watch::Sender<ListSnapshot>,
}

#[derive(Default)]
struct State {
    query: String,
    phase: QueryPhase,
    torn_down: bool,
    /// Identity of the current request; settlements carrying an older value
    /// are stale and discarded at apply time.
    request_seq: u64,
    cancel: Option<CancellationToken>,
    /// Identity of the pending debounce timer; the epoch, not the abort
    /// handle, is what prevents a superseded timer from firing.
    debounce_epoch: u64,
    debounce_timer: Option<AbortHandle>,
}

impl<A: RecordApi + 'static> DebouncedQueryController<A> {
    /// Creates a controller over the given collaborator.
    #[must_use]
    pub fn new(api: Arc<A>, timing: InteractionTiming) -> Self {
        let (snapshot_tx, _initial_rx) = watch::channel(ListSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                api,
                state: Mutex::new(State::default()),
                snapshot_tx,
            }),
            timing,
        }
    }

    /// Subscribes to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Records a keystroke and (re)starts the debounce window.
    ///
    /// The query updates immediately so the input reflects keystrokes with
    /// no delay, and any displayed error clears at once rather than waiting
    /// for the window to elapse. Only the final call within one window
    /// fires a fetch.
    pub fn set_query(&self, text: impl Into<String>) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        state.query = text.into();
        state.phase = QueryPhase::Debouncing;
        state.debounce_epoch += 1;
        if let Some(timer) = state.debounce_timer.take() {
            timer.abort();
        }
        self.shared.publish(&state);

        let epoch = state.debounce_epoch;
        let shared = Arc::clone(&self.shared);
        let window = self.timing.debounce_window;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            Shared::fire_if_current(&shared, epoch).await;
        });
        state.debounce_timer = Some(timer.abort_handle());
    }

    /// Clears the query and immediately fetches the unfiltered list.
    ///
    /// Clearing is not itself debounced: the pending timer is discarded and
    /// the in-flight request, if any, is cancelled.
    pub fn reset(&self) {
        self.fire_immediately(Some(String::new()));
    }

    /// Re-issues the current query path immediately, bypassing the debounce
    /// window. Serves the initial load and the explicit retry control.
    pub fn refresh(&self) {
        self.fire_immediately(None);
    }

    /// Cancels the in-flight request and pending timer; afterwards no fetch
    /// fires and no settlement mutates state, under any timing.
    pub fn teardown(&self) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        state.debounce_epoch += 1;
        if let Some(timer) = state.debounce_timer.take() {
            timer.abort();
        }
        if let Some(token) = state.cancel.take() {
            token.cancel();
        }
        debug!("list query controller torn down");
    }

    fn fire_immediately(&self, replace_query: Option<String>) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        if let Some(query) = replace_query {
            state.query = query;
        }
        state.debounce_epoch += 1;
        if let Some(timer) = state.debounce_timer.take() {
            timer.abort();
        }
        let (token, seq, query) = state.begin_fetch();
        self.shared.publish(&state);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            Shared::run_fetch(&shared, token, seq, query).await;
        });
    }
}

impl<A: RecordApi + 'static> Drop for DebouncedQueryController<A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl State {
    /// Supersedes the current request: cancels its token, advances the
    /// sequence, and moves to [`QueryPhase::Loading`].
    fn begin_fetch(&mut self) -> (CancellationToken, u64, Option<String>) {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        self.request_seq += 1;
        self.phase = QueryPhase::Loading;
        let query = effective_query(&self.query).map(ToOwned::to_owned);
        (token, self.request_seq, query)
    }
}

impl<A: RecordApi + 'static> Shared<A> {
    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a task panicked mid-update; the state
        // itself stays coherent for teardown and supersession.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.snapshot_tx.send_replace(ListSnapshot {
            query: state.query.clone(),
            phase: state.phase.clone(),
        });
    }

    /// Debounce-elapse path: fires the fetch only when this timer is still
    /// the current one.
    async fn fire_if_current(shared: &Arc<Self>, epoch: u64) {
        let (token, seq, query) = {
            let mut state = shared.lock();
            if state.torn_down || state.debounce_epoch != epoch {
                debug!(epoch, "discarding superseded debounce timer");
                return;
            }
            let fired = state.begin_fetch();
            shared.publish(&state);
            fired
        };
        Self::run_fetch(shared, token, seq, query).await;
    }

    async fn run_fetch(
        shared: &Arc<Self>,
        token: CancellationToken,
        seq: u64,
        query: Option<String>,
    ) {
        let outcome = execute(&token, shared.api.list_records(query.as_deref(), &token)).await;
        let mut state = shared.lock();
        if state.torn_down || state.request_seq != seq {
            debug!(seq, "discarding settlement of superseded list request");
            return;
        }
        match outcome {
            Outcome::Succeeded(records) => state.phase = QueryPhase::Loaded(records),
            Outcome::Failed(err) => state.phase = QueryPhase::Errored(err.user_message()),
            // The newer operation owns the phase now; leave it untouched.
            Outcome::Cancelled => return,
        }
        shared.publish(&state);
    }
}
