//! Detail-view load flows.

use super::helpers::{adr_number, api, settle};
use aalto::detail::{DetailController, DetailPhase};
use aalto::record::adapters::InMemoryRecordApi;
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test(start_paused = true)]
async fn loading_a_record_yields_detail_and_the_status_set(api: Arc<InMemoryRecordApi>) {
    let view = DetailController::new(api, adr_number(5));

    view.load();
    settle().await;

    let DetailPhase::Ready { detail, statuses } = view.snapshot() else {
        panic!("expected the detail view to become ready");
    };
    assert_eq!(detail.number(), adr_number(5));
    assert_eq!(detail.title(), "Use PostgreSQL");
    let labels: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
    assert_eq!(labels, ["Proposed", "Accepted", "Deprecated", "Superseded"]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn a_missing_record_reports_not_found(api: Arc<InMemoryRecordApi>) {
    let view = DetailController::new(api, adr_number(99));

    view.load();
    settle().await;

    assert_eq!(
        view.snapshot(),
        DetailPhase::NotFound("ADR #99 not found".to_owned())
    );
}
