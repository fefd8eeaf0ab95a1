//! Wire-shape tests against the record API's JSON format.

use crate::record::domain::{AdrDetail, AdrSummary, TransitionIntent};
use crate::test_support::{detail_record, number, summary};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn summary_deserialises_from_the_wire_shape() -> eyre::Result<()> {
    let parsed: AdrSummary = serde_json::from_value(json!({
        "number": 1,
        "title": "Use PostgreSQL",
        "status": "Accepted",
        "date": "2025-01-15",
    }))?;

    assert_eq!(parsed, summary(1, "Use PostgreSQL", "Accepted", "2025-01-15"));
    Ok(())
}

#[rstest]
fn summary_serialises_with_the_original_field_names() -> eyre::Result<()> {
    let value = serde_json::to_value(summary(2, "Use Redis", "Proposed", "2025-02-01"))?;
    assert_eq!(
        value,
        json!({
            "number": 2,
            "title": "Use Redis",
            "status": "Proposed",
            "date": "2025-02-01",
        })
    );
    Ok(())
}

#[rstest]
fn detail_flattens_the_summary_fields() -> eyre::Result<()> {
    let parsed: AdrDetail = serde_json::from_value(json!({
        "number": 5,
        "title": "Use PostgreSQL",
        "status": "Accepted",
        "date": "2025-01-15",
        "content": "## Context\nWe need a database.",
    }))?;

    assert_eq!(parsed.number(), number(5));
    assert_eq!(parsed.status().as_str(), "Accepted");
    assert_eq!(parsed.content, "## Context\nWe need a database.");
    Ok(())
}

#[rstest]
fn direct_intent_omits_the_superseded_by_field() -> eyre::Result<()> {
    let value = serde_json::to_value(TransitionIntent::direct("Accepted".into()))?;
    assert_eq!(value, json!({ "status": "Accepted" }));
    Ok(())
}

#[rstest]
fn supersede_intent_includes_the_superseded_by_field() -> eyre::Result<()> {
    let value = serde_json::to_value(TransitionIntent::supersede(number(3)))?;
    assert_eq!(value, json!({ "status": "Superseded", "supersededBy": 3 }));
    Ok(())
}

#[rstest]
fn detail_round_trips_through_json() -> eyre::Result<()> {
    let detail = detail_record(7, "Use SQLite", "Proposed", "2025-02-01");
    let round_tripped: AdrDetail = serde_json::from_value(serde_json::to_value(&detail)?)?;
    assert_eq!(round_tripped, detail);
    Ok(())
}
