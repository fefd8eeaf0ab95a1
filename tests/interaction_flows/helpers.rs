//! Shared test helpers for interaction-flow integration tests.

use aalto::record::adapters::InMemoryRecordApi;
use aalto::record::domain::{AdrDetail, AdrNumber, AdrSummary, StatusLabel};
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;

/// Builds a validated record number.
pub fn adr_number(value: u32) -> AdrNumber {
    AdrNumber::new(value).expect("positive record number")
}

/// Builds a full record from literal parts.
pub fn record(number: u32, title: &str, status: &str, date: &str) -> AdrDetail {
    AdrDetail {
        summary: AdrSummary {
            number: adr_number(number),
            title: title.to_owned(),
            status: StatusLabel::from(status),
            date: date.parse().expect("ISO date"),
        },
        content: format!("## Context\n{title}."),
    }
}

/// The reference record set: three decisions, with #5 the one under edit in
/// the transition flows.
#[fixture]
pub fn api() -> Arc<InMemoryRecordApi> {
    Arc::new(InMemoryRecordApi::new(
        vec![
            record(3, "Use MySQL", "Accepted", "2025-01-01"),
            record(5, "Use PostgreSQL", "Accepted", "2025-01-15"),
            record(7, "Use SQLite", "Proposed", "2025-02-01"),
        ],
        ["Proposed", "Accepted", "Deprecated", "Superseded"]
            .into_iter()
            .map(StatusLabel::from)
            .collect(),
    ))
}

/// Lets every ready task run and settle without advancing past any timer.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Advances past the default debounce window.
pub async fn elapse_debounce() {
    tokio::time::sleep(Duration::from_millis(350)).await;
}

/// Advances past the default success-feedback window.
pub async fn elapse_feedback_window() {
    tokio::time::sleep(Duration::from_millis(4100)).await;
}
