//! Status-transition flows: direct changes and the supersede sub-flow.

use super::helpers::{adr_number, api, elapse_feedback_window, settle};
use aalto::record::adapters::InMemoryRecordApi;
use aalto::record::domain::StatusLabel;
use aalto::search::{DebouncedQueryController, QueryPhase};
use aalto::timing::InteractionTiming;
use aalto::transition::{CandidatePhase, Feedback, StatusTransitionMachine};
use rstest::rstest;
use std::sync::Arc;

/// Machine editing record #5, last confirmed as `Accepted`.
fn machine(api: &Arc<InMemoryRecordApi>) -> StatusTransitionMachine<InMemoryRecordApi> {
    StatusTransitionMachine::new(
        Arc::clone(api),
        adr_number(5),
        StatusLabel::from("Accepted"),
        InteractionTiming::default(),
    )
}

/// Reads record #5's status back through the listing path.
async fn status_of_record_five(api: &Arc<InMemoryRecordApi>) -> String {
    let list = DebouncedQueryController::new(Arc::clone(api), InteractionTiming::default());
    list.refresh();
    settle().await;
    let QueryPhase::Loaded(records) = list.snapshot().phase else {
        panic!("expected the listing to load");
    };
    records
        .iter()
        .find(|r| r.number == adr_number(5))
        .map(|r| r.status.as_str().to_owned())
        .expect("record #5 should be listed")
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn a_direct_transition_round_trips(api: Arc<InMemoryRecordApi>) {
    let flow = machine(&api);

    flow.select_status(StatusLabel::from("Deprecated"));
    settle().await;

    let snapshot = flow.snapshot();
    assert_eq!(snapshot.confirmed.as_str(), "Deprecated");
    assert_eq!(
        snapshot.feedback,
        Some(Feedback::Success("Status updated to Deprecated".to_owned()))
    );
    assert_eq!(status_of_record_five(&api).await, "Deprecated");

    elapse_feedback_window().await;
    assert_eq!(flow.snapshot().feedback, None);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn the_supersede_sub_flow_round_trips(api: Arc<InMemoryRecordApi>) {
    let flow = machine(&api);

    flow.select_status(StatusLabel::superseded());
    settle().await;

    let CandidatePhase::Loaded(candidates) = flow.candidates().snapshot() else {
        panic!("expected the candidate list to load");
    };
    let numbers: Vec<u32> = candidates.iter().map(|r| r.number.value()).collect();
    assert_eq!(numbers, [3, 7]);

    flow.choose_supersede_target(adr_number(3));
    flow.confirm_supersede();
    settle().await;

    assert_eq!(flow.snapshot().confirmed.as_str(), "Superseded");
    assert_eq!(status_of_record_five(&api).await, "Superseded");
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn cancelling_the_sub_flow_leaves_the_record_untouched(api: Arc<InMemoryRecordApi>) {
    let flow = machine(&api);

    flow.select_status(StatusLabel::superseded());
    settle().await;
    flow.cancel_supersede();
    settle().await;

    let snapshot = flow.snapshot();
    assert!(!snapshot.panel_open());
    assert_eq!(snapshot.selected.as_str(), "Accepted");
    assert_eq!(flow.candidates().snapshot(), CandidatePhase::Idle);
    assert_eq!(status_of_record_five(&api).await, "Accepted");
}
