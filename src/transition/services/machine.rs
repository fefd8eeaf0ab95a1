//! Status-transition machine for the record detail view.

use crate::record::domain::{AdrNumber, StatusLabel, TransitionIntent};
use crate::record::ports::RecordApi;
use crate::request::{Outcome, execute};
use crate::timing::InteractionTiming;
use crate::transition::domain::{Feedback, TransitionFlow, TransitionSnapshot};
use crate::transition::services::SupersedeCandidateController;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Owns the lifecycle of changing one record's status.
///
/// Non-reserved selections submit immediately; selecting
/// [`StatusLabel::SUPERSEDED`] opens the confirmation sub-flow instead and
/// loads the candidate list through the owned
/// [`SupersedeCandidateController`]. The selection is applied
/// optimistically and rolled back to the last confirmed status on failure
/// or cancellation. Commands spawn Tokio tasks and must therefore be issued
/// from within a runtime.
pub struct StatusTransitionMachine<A: RecordApi + 'static> {
    shared: Arc<Shared<A>>,
    candidates: SupersedeCandidateController<A>,
    timing: InteractionTiming,
}

struct Shared<A> {
    api: Arc<A>,
    /// The record whose status is being edited.
    number: AdrNumber,
    state: Mutex<State>,
    snapshot_tx: watch::Sender<TransitionSnapshot>,
}

struct State {
    confirmed: StatusLabel,
    selected: StatusLabel,
    flow: TransitionFlow,
    feedback: Option<Feedback>,
    torn_down: bool,
    request_seq: u64,
    cancel: Option<CancellationToken>,
    /// Identity of the pending success-feedback timer; the epoch, not the
    /// abort handle, is what keeps a superseded timer from clearing newer
    /// feedback.
    feedback_epoch: u64,
    feedback_timer: Option<AbortHandle>,
}

impl<A: RecordApi + 'static> StatusTransitionMachine<A> {
    /// Creates a machine for the given record, starting from its last
    /// confirmed status.
    #[must_use]
    pub fn new(
        api: Arc<A>,
        number: AdrNumber,
        confirmed: StatusLabel,
        timing: InteractionTiming,
    ) -> Self {
        let candidates = SupersedeCandidateController::new(Arc::clone(&api), number);
        let (snapshot_tx, _initial_rx) = watch::channel(TransitionSnapshot {
            confirmed: confirmed.clone(),
            selected: confirmed.clone(),
            flow: TransitionFlow::Viewing,
            feedback: None,
        });
        Self {
            shared: Arc::new(Shared {
                api,
                number,
                state: Mutex::new(State {
                    confirmed: confirmed.clone(),
                    selected: confirmed,
                    flow: TransitionFlow::Viewing,
                    feedback: None,
                    torn_down: false,
                    request_seq: 0,
                    cancel: None,
                    feedback_epoch: 0,
                    feedback_timer: None,
                }),
                snapshot_tx,
            }),
            candidates,
            timing,
        }
    }

    /// The candidate-list controller backing the supersede panel.
    #[must_use]
    pub const fn candidates(&self) -> &SupersedeCandidateController<A> {
        &self.candidates
    }

    /// Subscribes to snapshot updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TransitionSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TransitionSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Handles the user picking a status in the control.
    ///
    /// Ignored while an update is in flight. Any open supersede panel is
    /// closed first, reverting the selection, so a stray pick acts as a
    /// cancel. The reserved label opens the confirmation sub-flow; anything
    /// else submits immediately.
    pub fn select_status(&self, candidate: StatusLabel) {
        let mut state = self.shared.lock();
        if state.torn_down || matches!(state.flow, TransitionFlow::Submitting) {
            return;
        }
        if matches!(state.flow, TransitionFlow::AwaitingTarget { .. }) {
            state.flow = TransitionFlow::Viewing;
            state.selected = state.confirmed.clone();
            self.candidates.cancel();
        }
        if candidate == state.confirmed {
            self.shared.publish(&state);
            return;
        }
        if candidate.is_superseded() {
            state.selected = candidate;
            state.flow = TransitionFlow::AwaitingTarget { chosen: None };
            self.shared.publish(&state);
            drop(state);
            self.candidates.load();
        } else {
            self.submit(&mut state, TransitionIntent::direct(candidate));
        }
    }

    /// Records the superseding record chosen in the panel.
    ///
    /// Only meaningful while the panel is open; the record's own number is
    /// never a lawful target.
    pub fn choose_supersede_target(&self, target: AdrNumber) {
        let mut state = self.shared.lock();
        if state.torn_down || target == self.shared.number {
            return;
        }
        if let TransitionFlow::AwaitingTarget { chosen } = &mut state.flow {
            *chosen = Some(target);
            self.shared.publish(&state);
        }
    }

    /// Submits the supersede transition for the chosen target.
    ///
    /// A guard no-op when no target has been chosen. Enter in the panel
    /// maps here, so Enter without a choice neither submits nor errors.
    pub fn confirm_supersede(&self) {
        let mut state = self.shared.lock();
        if state.torn_down {
            return;
        }
        let TransitionFlow::AwaitingTarget {
            chosen: Some(target),
        } = state.flow
        else {
            return;
        };
        self.candidates.cancel();
        self.submit(&mut state, TransitionIntent::supersede(target));
    }

    /// Abandons the supersede sub-flow.
    ///
    /// Cancels the candidate fetch, closes the panel, and restores the
    /// selection to the last confirmed status, never to the rejected
    /// candidate.
    pub fn cancel_supersede(&self) {
        let mut state = self.shared.lock();
        if state.torn_down || !matches!(state.flow, TransitionFlow::AwaitingTarget { .. }) {
            return;
        }
        state.flow = TransitionFlow::Viewing;
        state.selected = state.confirmed.clone();
        self.candidates.cancel();
        self.shared.publish(&state);
    }

    /// Cancels the outstanding update and timers; afterwards no settlement
    /// or timer callback mutates state.
    pub fn teardown(&self) {
        {
            let mut state = self.shared.lock();
            if state.torn_down {
                return;
            }
            state.torn_down = true;
            state.feedback_epoch += 1;
            if let Some(timer) = state.feedback_timer.take() {
                timer.abort();
            }
            if let Some(token) = state.cancel.take() {
                token.cancel();
            }
        }
        self.candidates.teardown();
        debug!("status transition machine torn down");
    }

    /// Starts the update, applying the candidate optimistically.
    fn submit(&self, state: &mut State, intent: TransitionIntent) {
        state.feedback = None;
        state.feedback_epoch += 1;
        if let Some(timer) = state.feedback_timer.take() {
            timer.abort();
        }
        state.selected = intent.target_status.clone();
        state.flow = TransitionFlow::Submitting;
        if let Some(previous) = state.cancel.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        state.cancel = Some(token.clone());
        state.request_seq += 1;
        let seq = state.request_seq;
        self.shared.publish(state);

        let shared = Arc::clone(&self.shared);
        let feedback_window = self.timing.feedback_window;
        tokio::spawn(async move {
            Shared::run_update(&shared, token, seq, intent, feedback_window).await;
        });
    }
}

impl<A: RecordApi + 'static> Drop for StatusTransitionMachine<A> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<A: RecordApi + 'static> Shared<A> {
    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a task panicked mid-update; the state
        // itself stays coherent for teardown and supersession.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.snapshot_tx.send_replace(TransitionSnapshot {
            confirmed: state.confirmed.clone(),
            selected: state.selected.clone(),
            flow: state.flow,
            feedback: state.feedback.clone(),
        });
    }

    async fn run_update(
        shared: &Arc<Self>,
        token: CancellationToken,
        seq: u64,
        intent: TransitionIntent,
        feedback_window: Duration,
    ) {
        let outcome = execute(&token, shared.api.update_status(shared.number, &intent)).await;
        let mut state = shared.lock();
        if state.torn_down || state.request_seq != seq {
            debug!(seq, "discarding settlement of superseded status update");
            return;
        }
        match outcome {
            Outcome::Succeeded(detail) => {
                state.confirmed = detail.status().clone();
                state.selected = state.confirmed.clone();
                state.flow = TransitionFlow::Viewing;
                state.feedback = Some(Feedback::Success(format!(
                    "Status updated to {}",
                    state.confirmed
                )));
                Self::start_feedback_timer(shared, &mut state, feedback_window);
            }
            Outcome::Failed(err) => {
                state.selected = state.confirmed.clone();
                state.flow = TransitionFlow::Viewing;
                state.feedback = Some(Feedback::Error(err.user_message()));
            }
            // Only teardown cancels an update; nothing left to mutate.
            Outcome::Cancelled => return,
        }
        shared.publish(&state);
    }

    fn start_feedback_timer(shared: &Arc<Self>, state: &mut State, window: Duration) {
        state.feedback_epoch += 1;
        let epoch = state.feedback_epoch;
        let timer_shared = Arc::clone(shared);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut timed_state = timer_shared.lock();
            if timed_state.torn_down || timed_state.feedback_epoch != epoch {
                return;
            }
            timed_state.feedback = None;
            timed_state.feedback_timer = None;
            timer_shared.publish(&timed_state);
        });
        state.feedback_timer = Some(timer.abort_handle());
    }
}
