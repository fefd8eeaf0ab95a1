//! Shared fixtures for controller and adapter tests.

use crate::record::domain::{AdrDetail, AdrNumber, AdrSummary, StatusLabel, TransitionIntent};
use crate::record::ports::{RecordApi, RecordApiError, RecordApiResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// Builds a validated record number.
pub(crate) fn number(value: u32) -> AdrNumber {
    AdrNumber::new(value).expect("positive record number")
}

/// Builds a summary row from literal parts.
pub(crate) fn summary(n: u32, title: &str, status: &str, date: &str) -> AdrSummary {
    AdrSummary {
        number: number(n),
        title: title.to_owned(),
        status: StatusLabel::from(status),
        date: date.parse().expect("ISO date"),
    }
}

/// Builds a full record from literal parts.
pub(crate) fn detail_record(n: u32, title: &str, status: &str, date: &str) -> AdrDetail {
    AdrDetail {
        summary: summary(n, title, status, date),
        content: format!("## Context\n{title}."),
    }
}

/// Builds a status set from literal labels.
pub(crate) fn statuses(labels: &[&str]) -> Vec<StatusLabel> {
    labels.iter().copied().map(StatusLabel::from).collect()
}

/// One scripted settlement for a collaborator call.
pub(crate) enum Scripted<T> {
    /// Settles as soon as the call arrives.
    Ready(RecordApiResult<T>),
    /// Settles when (and if) the paired sender fires; cancellation drops
    /// the call future first and leaves the sender dangling.
    Gated(oneshot::Receiver<RecordApiResult<T>>),
}

/// Record API fake with per-call scripted settlements.
///
/// Every call consumes the next queued settlement for its method and is
/// recorded for assertions. Gated settlements let a test hold a response
/// open across a supersession to exercise the stale-result paths.
#[derive(Default)]
pub(crate) struct ScriptedRecordApi {
    list_responses: Mutex<VecDeque<Scripted<Vec<AdrSummary>>>>,
    get_responses: Mutex<VecDeque<Scripted<AdrDetail>>>,
    status_responses: Mutex<VecDeque<Scripted<Vec<StatusLabel>>>>,
    update_responses: Mutex<VecDeque<Scripted<AdrDetail>>>,
    list_calls: Mutex<Vec<Option<String>>>,
    get_calls: Mutex<Vec<AdrNumber>>,
    status_calls: Mutex<usize>,
    update_calls: Mutex<Vec<(AdrNumber, TransitionIntent)>>,
}

impl ScriptedRecordApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn queue_list(&self, result: RecordApiResult<Vec<AdrSummary>>) {
        self.list_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn queue_list_gated(&self) -> oneshot::Sender<RecordApiResult<Vec<AdrSummary>>> {
        let (tx, rx) = oneshot::channel();
        self.list_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn queue_get(&self, result: RecordApiResult<AdrDetail>) {
        self.get_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn queue_get_gated(&self) -> oneshot::Sender<RecordApiResult<AdrDetail>> {
        let (tx, rx) = oneshot::channel();
        self.get_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn queue_statuses(&self, result: RecordApiResult<Vec<StatusLabel>>) {
        self.status_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn queue_update(&self, result: RecordApiResult<AdrDetail>) {
        self.update_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn queue_update_gated(&self) -> oneshot::Sender<RecordApiResult<AdrDetail>> {
        let (tx, rx) = oneshot::channel();
        self.update_responses
            .lock()
            .expect("lock")
            .push_back(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().expect("lock").clone()
    }

    pub(crate) fn get_calls(&self) -> Vec<AdrNumber> {
        self.get_calls.lock().expect("lock").clone()
    }

    pub(crate) fn status_call_count(&self) -> usize {
        *self.status_calls.lock().expect("lock")
    }

    pub(crate) fn update_calls(&self) -> Vec<(AdrNumber, TransitionIntent)> {
        self.update_calls.lock().expect("lock").clone()
    }

    fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Scripted<T> {
        queue
            .lock()
            .expect("lock")
            .pop_front()
            .expect("a scripted settlement should be queued for every call")
    }

    async fn settle<T>(scripted: Scripted<T>) -> RecordApiResult<T> {
        match scripted {
            Scripted::Ready(result) => result,
            Scripted::Gated(rx) => rx.await.unwrap_or(Err(RecordApiError::Cancelled)),
        }
    }
}

#[async_trait]
impl RecordApi for ScriptedRecordApi {
    async fn list_records<'a>(
        &self,
        query: Option<&'a str>,
        _cancel: &CancellationToken,
    ) -> RecordApiResult<Vec<AdrSummary>> {
        self.list_calls
            .lock()
            .expect("lock")
            .push(query.map(ToOwned::to_owned));
        Self::settle(Self::next(&self.list_responses)).await
    }

    async fn get_record(
        &self,
        number: AdrNumber,
        _cancel: &CancellationToken,
    ) -> RecordApiResult<AdrDetail> {
        self.get_calls.lock().expect("lock").push(number);
        Self::settle(Self::next(&self.get_responses)).await
    }

    async fn list_statuses(&self) -> RecordApiResult<Vec<StatusLabel>> {
        *self.status_calls.lock().expect("lock") += 1;
        Self::settle(Self::next(&self.status_responses)).await
    }

    async fn update_status(
        &self,
        number: AdrNumber,
        intent: &TransitionIntent,
    ) -> RecordApiResult<AdrDetail> {
        self.update_calls
            .lock()
            .expect("lock")
            .push((number, intent.clone()));
        Self::settle(Self::next(&self.update_responses)).await
    }
}
