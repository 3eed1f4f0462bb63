//! REST implementation of [`ComplaintTransport`].

use std::sync::Arc;
use std::time::Duration;

use complaint_hub_core::{Complaint, ComplaintId, ComplaintStatus, ValidDraft};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{ComplaintTransport, TransportError};
use crate::config::ClientConfig;

/// HTTP client for the complaints REST API.
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<HttpTransportInner>,
}

struct HttpTransportInner {
    client: reqwest::Client,
    /// Collection URL, e.g. `http://localhost:8080/api/complaints`.
    base_url: Url,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Create a transport for the given collection URL.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::NetworkFailure` if the URL cannot carry path
    /// segments or the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        if base_url.cannot_be_a_base() {
            return Err(TransportError::NetworkFailure(format!(
                "base url cannot have path segments: {base_url}"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                TransportError::NetworkFailure(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            inner: Arc::new(HttpTransportInner { client, base_url }),
        })
    }

    /// Create a transport from loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::new`].
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.api_url.clone(), config.timeout)
    }

    /// The collection URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// `{base}/{complaintId}/status?status={status}`
    fn status_url(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Url, TransportError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::NetworkFailure("base url cannot have path segments".to_string())
            })?
            .pop_if_empty()
            .push(complaint_id.as_str())
            .push("status");
        url.query_pairs_mut().append_pair("status", status.as_str());
        Ok(url)
    }
}

impl ComplaintTransport for HttpTransport {
    #[instrument(skip(self, draft), fields(category = %draft.category()))]
    async fn create(&self, draft: &ValidDraft) -> Result<Complaint, TransportError> {
        let response = self
            .inner
            .client
            .post(self.inner.base_url.clone())
            .json(draft)
            .send()
            .await
            .map_err(network_failure)?;

        let response = ensure_success(response).await?;
        let complaint: Complaint = parse_body(response).await?;

        if complaint.complaint_id.is_blank() {
            warn!("Backend created a complaint without an id");
            return Err(TransportError::BadResponse(
                "created complaint has no complaintId".to_string(),
            ));
        }
        if complaint.status != ComplaintStatus::Pending {
            warn!(status = %complaint.status, "Backend created a complaint that is not pending");
            return Err(TransportError::BadResponse(format!(
                "created complaint has status {}",
                complaint.status
            )));
        }

        debug!(complaint_id = %complaint.complaint_id, "Complaint created");
        Ok(complaint)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Complaint>, TransportError> {
        let response = self
            .inner
            .client
            .get(self.inner.base_url.clone())
            .send()
            .await
            .map_err(network_failure)?;

        let response = ensure_success(response).await?;
        let complaints: Vec<Complaint> = parse_body(response).await?;

        debug!(count = complaints.len(), "Complaints fetched");
        Ok(complaints)
    }

    #[instrument(skip(self), fields(complaint_id = %complaint_id, status = %status))]
    async fn update_status(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, TransportError> {
        let url = self.status_url(complaint_id, status)?;

        let response = self
            .inner
            .client
            .put(url)
            .send()
            .await
            .map_err(network_failure)?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Backend reported unknown complaint id");
            return Err(TransportError::NotFound(complaint_id.clone()));
        }

        let response = ensure_success(response).await?;
        let complaint: Complaint = parse_body(response).await?;

        debug!("Complaint status updated");
        Ok(complaint)
    }
}

fn network_failure(e: reqwest::Error) -> TransportError {
    warn!(error = %e, "Request to complaints backend failed");
    TransportError::NetworkFailure(e.to_string())
}

/// Turn a non-success status into `BadResponse`, keeping the body for context.
async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = %status, "Complaints backend returned an error status");
    Err(TransportError::BadResponse(if body.is_empty() {
        format!("backend returned {status}")
    } else {
        format!("backend returned {status}: {body}")
    }))
}

/// Read the whole body, then decode it so that transport and decode failures
/// stay distinguishable.
async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let bytes = response.bytes().await.map_err(network_failure)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "Could not parse complaints backend response");
        TransportError::BadResponse(format!("failed to parse response: {e}"))
    })
}
