//! Backend transport for complaint records.
//!
//! This module provides:
//! - [`ComplaintTransport`], the seam between the lifecycle controller and the
//!   backend
//! - [`HttpTransport`], the `reqwest` implementation against the REST API
//! - [`TransportError`], the post-network error taxonomy
//!
//! # Backend surface
//!
//! - `POST {base}` - create a complaint from a draft
//! - `GET {base}` - list every complaint
//! - `PUT {base}/{complaintId}/status?status={pending|resolved}` - update status
//!
//! Calls are never retried here. Each one completes with either a value or a
//! definitive error and the caller decides what happens next.

mod http;

use std::future::Future;

use complaint_hub_core::{Complaint, ComplaintId, ComplaintStatus, ValidDraft};
use thiserror::Error;

pub use http::HttpTransport;

/// Errors that can occur after a request has been attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backend could not be reached or the connection failed mid-request.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The backend answered, but not with something we can use.
    #[error("bad response: {0}")]
    BadResponse(String),

    /// The backend has no complaint with this id.
    #[error("complaint not found: {0}")]
    NotFound(ComplaintId),
}

/// Operations the lifecycle controller needs from the backend.
///
/// Every method returns a `Send` future so intents can be driven from any
/// task. Implementations must not retry on their own.
pub trait ComplaintTransport: Send + Sync {
    /// Submit a validated draft and return the record the server created.
    fn create(
        &self,
        draft: &ValidDraft,
    ) -> impl Future<Output = Result<Complaint, TransportError>> + Send;

    /// Fetch the full complaint set in backend order.
    fn list(&self) -> impl Future<Output = Result<Vec<Complaint>, TransportError>> + Send;

    /// Set the status of one complaint and return the updated record.
    fn update_status(
        &self,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
    ) -> impl Future<Output = Result<Complaint, TransportError>> + Send;
}
