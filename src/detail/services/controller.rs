//! Detail-view load controller.

use crate::detail::domain::DetailPhase;
use crate::record::domain::AdrNumber;
use crate::record::ports::{RecordApi, RecordApiError};
use crate::request::{Outcome, execute};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Loads one record's detail together with the open status set.
///
/// Both fetches run jointly under a single cancellation token; a reload or
/// teardown supersedes the pair as one unit. Commands spawn Tokio tasks and
/// must therefore be issued from within a runtime.
pub struct DetailController<A: RecordApi + 'static> {
    shared: Arc<Shared<A>>,
}

struct Shared<A> {
    api: Arc<A>,
    number: AdrNumber,
    state: Mutex<State>,
    snapshot_tx: watch::Sender<DetailPhase>,
}

#[derive(Default)]
struct State {
    torn_down: bool,
    request_seq: u64,
    cancel: Option<CancellationToken>,
}

impl<A: RecordApi + 'static> DetailController<A> {
    /// Creates a controller for the given record number.
    #[must_use]
    pub fn new(api: Arc<A>, number: AdrNumber) -> Self {
        let (snapshot_tx, _initial_rx) = watch::channel(DetailPhase::Loading);
        Self {
            shared: Arc::new(Shared {
                api,
                number,
                state: Mutex::new(State::default()),
                snapshot_tx,
            }),
        }
    }

    /// Subscribes to phase updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DetailPhase> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Returns the current phase.
    #[must_use]
    pub fn snapshot(&self) -> DetailPhase {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Starts or restarts the load, superseding any previous one.
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
        self.shared.snapshot_tx.send_replace(DetailPhase::Loading);

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            Shared::run_load(&shared, token, seq).await;
        });
    }

    /// Cancels the outstanding load; afterwards no settlement mutates state.
    pub fn teardown(&self) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        if let Some(token) = state.cancel.take() {
            token.cancel();
        }
        debug!("detail controller torn down");
    }
}

impl<A: RecordApi + 'static> Drop for DetailController<A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<A: RecordApi + 'static> Shared<A> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_load(shared: &Arc<Self>, token: CancellationToken, seq: u64) {
        let detail_fut = execute(&token, shared.api.get_record(shared.number, &token));
        let statuses_fut = execute(&token, shared.api.list_statuses());
        let (detail_outcome, statuses_outcome) = tokio::join!(detail_fut, statuses_fut);

        let state = shared.lock();
        if state.torn_down || state.request_seq != seq {
            debug!(seq, "discarding settlement of superseded detail load");
            return;
        }
        let phase = match (detail_outcome, statuses_outcome) {
            (Outcome::Cancelled, _) | (_, Outcome::Cancelled) => return,
            (Outcome::Failed(err @ RecordApiError::NotFound(_)), _) => {
                DetailPhase::NotFound(err.user_message())
            }
            (Outcome::Failed(err), _) | (Outcome::Succeeded(_), Outcome::Failed(err)) => {
                DetailPhase::Errored(err.user_message())
            }
            (Outcome::Succeeded(detail), Outcome::Succeeded(statuses)) => {
                DetailPhase::Ready { detail, statuses }
            }
        };
        shared.snapshot_tx.send_replace(phase);
    }
}
