//! HTTP adapter for the record API port.

use crate::record::domain::{AdrDetail, AdrNumber, AdrSummary, StatusLabel, TransitionIntent};
use crate::record::ports::{ApiAction, RecordApi, RecordApiError, RecordApiResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

/// Record API served over HTTP by the reference server.
///
/// Endpoints: `GET /api/adr[?q=]`, `GET /api/adr/{n}`,
/// `GET /api/adr/statuses`, and `PATCH /api/adr/{n}/status`. Cancellation
/// aborts the in-flight request by dropping it.
#[derive(Debug, Clone)]
pub struct HttpRecordApi {
    client: Client,
    base_url: String,
}

impl HttpRecordApi {
    /// Creates an adapter against the given base URL with a default client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::default(), base_url)
    }

    /// Creates an adapter reusing an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            client,
            base_url: base,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send_json<T: DeserializeOwned>(
        request: RequestBuilder,
        action: ApiAction,
        not_found: Option<AdrNumber>,
    ) -> RecordApiResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(number) = not_found {
                return Err(RecordApiError::NotFound(number));
            }
        }
        if !status.is_success() {
            return Err(RecordApiError::Request {
                action,
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|_| RecordApiError::Unrecognized)
    }
}

/// Maps a client-side failure into the port taxonomy.
///
/// Failures before any response arrives mirror the browser's opaque network
/// error; anything else is unclassifiable.
fn transport_error(err: reqwest::Error) -> RecordApiError {
    if err.is_connect() || err.is_timeout() || err.is_request() {
        RecordApiError::Transport
    } else {
        RecordApiError::Unrecognized
    }
}

#[async_trait]
impl RecordApi for HttpRecordApi {
    async fn list_records<'a>(
        &self,
        query: Option<&'a str>,
        cancel: &CancellationToken,
    ) -> RecordApiResult<Vec<AdrSummary>> {
        let mut request = self.client.get(self.endpoint("/api/adr"));
        if let Some(q) = query {
            request = request.query(&[("q", q)]);
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(RecordApiError::Cancelled),
            result = Self::send_json(request, ApiAction::ListRecords, None) => result,
        }
    }

    async fn get_record(
        &self,
        number: AdrNumber,
        cancel: &CancellationToken,
    ) -> RecordApiResult<AdrDetail> {
        let request = self.client.get(self.endpoint(&format!("/api/adr/{number}")));
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(RecordApiError::Cancelled),
            result = Self::send_json(request, ApiAction::GetRecord, Some(number)) => result,
        }
    }

    async fn list_statuses(&self) -> RecordApiResult<Vec<StatusLabel>> {
        let request = self.client.get(self.endpoint("/api/adr/statuses"));
        Self::send_json(request, ApiAction::ListStatuses, None).await
    }

    async fn update_status(
        &self,
        number: AdrNumber,
        intent: &TransitionIntent,
    ) -> RecordApiResult<AdrDetail> {
        let request = self
            .client
            .patch(self.endpoint(&format!("/api/adr/{number}/status")))
            .json(intent);
        Self::send_json(request, ApiAction::UpdateStatus, Some(number)).await
    }
}
