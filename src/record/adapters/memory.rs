//! In-memory record API for tests and demos.

use crate::record::domain::{AdrDetail, AdrNumber, AdrSummary, StatusLabel, TransitionIntent};
use crate::record::ports::{RecordApi, RecordApiError, RecordApiResult};
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio_util::sync::CancellationToken;

/// Thread-safe in-memory record API.
///
/// Mirrors the reference server's behaviour: listing filters
/// case-insensitively against titles, all-digit queries additionally match
/// an exact record number, and a blank query returns everything.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordApi {
    records: Arc<RwLock<Vec<AdrDetail>>>,
    statuses: Vec<StatusLabel>,
}

impl InMemoryRecordApi {
    /// Creates an API serving the given records and status set.
    #[must_use]
    pub fn new(records: Vec<AdrDetail>, statuses: Vec<StatusLabel>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            statuses,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<AdrDetail>> {
        // A poisoned lock only means a reader panicked; the data is intact.
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AdrDetail>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Filters records by a search query.
///
/// Matches case-insensitively against the title; an all-digit query also
/// matches an exact record number. A blank query returns the input
/// unchanged.
fn filter_by_query(records: &[AdrDetail], query: &str) -> Vec<AdrSummary> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return records.iter().map(|record| record.summary.clone()).collect();
    }

    let lowered = trimmed.to_lowercase();
    let number_query: Option<u32> = if trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    };

    records
        .iter()
        .filter(|record| {
            record.summary.title.to_lowercase().contains(&lowered)
                || number_query.is_some_and(|n| record.number().value() == n)
        })
        .map(|record| record.summary.clone())
        .collect()
}

#[async_trait]
impl RecordApi for InMemoryRecordApi {
    async fn list_records<'a>(
        &self,
        query: Option<&'a str>,
        cancel: &CancellationToken,
    ) -> RecordApiResult<Vec<AdrSummary>> {
        if cancel.is_cancelled() {
            return Err(RecordApiError::Cancelled);
        }
        let records = self.read();
        Ok(query.map_or_else(
            || records.iter().map(|record| record.summary.clone()).collect(),
            |q| filter_by_query(&records, q),
        ))
    }

    async fn get_record(
        &self,
        number: AdrNumber,
        cancel: &CancellationToken,
    ) -> RecordApiResult<AdrDetail> {
        if cancel.is_cancelled() {
            return Err(RecordApiError::Cancelled);
        }
        self.read()
            .iter()
            .find(|record| record.number() == number)
            .cloned()
            .ok_or(RecordApiError::NotFound(number))
    }

    async fn list_statuses(&self) -> RecordApiResult<Vec<StatusLabel>> {
        Ok(self.statuses.clone())
    }

    async fn update_status(
        &self,
        number: AdrNumber,
        intent: &TransitionIntent,
    ) -> RecordApiResult<AdrDetail> {
        let mut records = self.write();
        let record = records
            .iter_mut()
            .find(|record| record.number() == number)
            .ok_or(RecordApiError::NotFound(number))?;
        record.summary.status = intent.target_status.clone();
        Ok(record.clone())
    }
}
