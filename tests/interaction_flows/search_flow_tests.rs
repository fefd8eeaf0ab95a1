//! Search-as-you-type flows against the in-memory listing.

use super::helpers::{api, elapse_debounce, record, settle};
use aalto::record::adapters::InMemoryRecordApi;
use aalto::search::{DebouncedQueryController, QueryPhase};
use aalto::timing::InteractionTiming;
use rstest::rstest;
use std::sync::Arc;

fn loaded_numbers(phase: &QueryPhase) -> Vec<u32> {
    let QueryPhase::Loaded(records) = phase else {
        panic!("expected a loaded listing, got {phase:?}");
    };
    records.iter().map(|r| r.number.value()).collect()
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn initial_load_lists_every_record(api: Arc<InMemoryRecordApi>) {
    let list = DebouncedQueryController::new(api, InteractionTiming::default());

    list.refresh();
    settle().await;

    assert_eq!(loaded_numbers(&list.snapshot().phase), [3, 5, 7]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn typing_filters_after_the_quiet_period(api: Arc<InMemoryRecordApi>) {
    let list = DebouncedQueryController::new(api, InteractionTiming::default());
    list.refresh();
    settle().await;

    list.set_query("post");
    elapse_debounce().await;

    assert_eq!(loaded_numbers(&list.snapshot().phase), [5]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn an_all_digit_query_finds_the_record_by_number() {
    let api = Arc::new(InMemoryRecordApi::new(
        vec![
            record(3, "Use MySQL", "Accepted", "2025-01-01"),
            record(42, "Adopt trunk-based development", "Accepted", "2025-04-01"),
        ],
        vec![],
    ));
    let list = DebouncedQueryController::new(api, InteractionTiming::default());

    list.set_query("42");
    elapse_debounce().await;

    assert_eq!(loaded_numbers(&list.snapshot().phase), [42]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn a_single_significant_character_runs_unfiltered(api: Arc<InMemoryRecordApi>) {
    let list = DebouncedQueryController::new(api, InteractionTiming::default());

    list.set_query("7 ");
    elapse_debounce().await;

    // One character after trimming never filters the listing.
    assert_eq!(loaded_numbers(&list.snapshot().phase), [3, 5, 7]);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn clearing_restores_the_full_listing(api: Arc<InMemoryRecordApi>) {
    let list = DebouncedQueryController::new(api, InteractionTiming::default());
    list.set_query("post");
    elapse_debounce().await;
    assert_eq!(loaded_numbers(&list.snapshot().phase), [5]);

    list.reset();
    settle().await;

    let snapshot = list.snapshot();
    assert_eq!(snapshot.query, "");
    assert_eq!(loaded_numbers(&snapshot.phase), [3, 5, 7]);
}
