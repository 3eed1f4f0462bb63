//! Lifecycle controller.
//!
//! Owns the authoritative complaint list and orchestrates the register,
//! refresh and set-status intents against a [`ComplaintTransport`].
//!
//! # Ownership
//!
//! The list is written only from inside this module. Each intent applies its
//! effect once, when its own transport call resolves:
//!
//! - `refresh` replaces the whole list with the fetched snapshot, so the last
//!   refresh to complete wins
//! - `register` never touches the list; callers refresh or use the returned
//!   record
//! - `set_status` never splices the updated record in; it triggers a refresh
//!
//! Intents are not serialized against each other and cannot be cancelled.
//! Reads are synchronous and never wait on the network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use complaint_hub_core::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, ValidationError, validate_draft,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::transport::{ComplaintTransport, TransportError};

/// Errors returned by lifecycle intents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The draft failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// An empty complaint id was supplied to a status update; nothing was sent.
    #[error("complaint id must not be empty")]
    InvalidComplaintId,
}

/// Snapshot of the controller for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerView {
    pub complaints: Vec<Complaint>,
    pub loading: bool,
    pub last_error: Option<String>,
}

/// Authoritative holder of the client's complaint list.
///
/// Cheap to clone; clones share state, so intents can be issued from several
/// tasks at once.
pub struct LifecycleController<T> {
    inner: Arc<ControllerInner<T>>,
}

struct ControllerInner<T> {
    transport: T,
    complaints: RwLock<Vec<Complaint>>,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

impl<T> Clone for LifecycleController<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for LifecycleController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleController")
            .field(
                "complaints",
                &self
                    .inner
                    .complaints
                    .read()
                    .map(|list| list.len())
                    .unwrap_or(0),
            )
            .field("in_flight", &self.inner.in_flight.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Marks one intent as in flight until dropped.
///
/// Dropping rather than decrementing explicitly keeps the count right when an
/// intent's future is dropped before it resolves.
struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<T: ComplaintTransport> LifecycleController<T> {
    /// Create a controller with an empty list.
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                transport,
                complaints: RwLock::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                last_error: Mutex::new(None),
            }),
        }
    }

    /// The transport intents are sent through.
    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Validate and submit a draft.
    ///
    /// The authoritative list is left alone; refresh to see the new record.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Validation` without touching the network, or
    /// `LifecycleError::Transport` if the create call fails.
    #[instrument(skip(self, draft))]
    pub async fn register(&self, draft: &ComplaintDraft) -> Result<Complaint, LifecycleError> {
        let valid = validate_draft(draft).inspect_err(|e| {
            debug!(error = %e, "Draft rejected");
        })?;

        let _guard = self.begin();
        let result = self.inner.transport.create(&valid).await;
        let complaint = self.settle(result)?;

        info!(complaint_id = %complaint.complaint_id, "Complaint registered");
        Ok(complaint)
    }

    /// Replace the authoritative list with the backend's current set.
    ///
    /// On failure the previous list is kept exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Transport` if the list call fails.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), LifecycleError> {
        let _guard = self.begin();
        let result = self.inner.transport.list().await;
        let complaints = self.settle(result)?;

        debug!(count = complaints.len(), "Authoritative list replaced");
        *self
            .inner
            .complaints
            .write()
            .unwrap_or_else(PoisonError::into_inner) = complaints;
        Ok(())
    }

    /// Set a complaint's status, then refresh the list from the backend.
    ///
    /// Callers are responsible for admin gating. The updated record is
    /// returned as the backend sent it. If the follow-up refresh fails, the
    /// update still counts as successful: the failure is recorded in
    /// [`last_error`](Self::last_error) and the list stays as it was.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidComplaintId` for an empty id before any
    /// network call, or `LifecycleError::Transport` if the update fails, in
    /// which case the list is not touched.
    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        complaint_id: &str,
        status: ComplaintStatus,
    ) -> Result<Complaint, LifecycleError> {
        let complaint_id =
            ComplaintId::parse(complaint_id).map_err(|_| LifecycleError::InvalidComplaintId)?;

        let updated = {
            let _guard = self.begin();
            let result = self
                .inner
                .transport
                .update_status(&complaint_id, status)
                .await;
            self.settle(result)?
        };

        info!(complaint_id = %updated.complaint_id, status = %updated.status, "Complaint status updated");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Refresh after status update failed");
        }

        Ok(updated)
    }

    /// Copy of the authoritative list.
    #[must_use]
    pub fn complaints(&self) -> Vec<Complaint> {
        self.inner
            .complaints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Look up a complaint in the authoritative list.
    #[must_use]
    pub fn find(&self, complaint_id: &ComplaintId) -> Option<Complaint> {
        self.inner
            .complaints
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|c| &c.complaint_id == complaint_id)
            .cloned()
    }

    /// `true` while at least one intent is waiting on the backend.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Message of the most recent failed intent, cleared when a new one starts.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.inner
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn view(&self) -> ControllerView {
        ControllerView {
            complaints: self.complaints(),
            loading: self.is_loading(),
            last_error: self.last_error(),
        }
    }

    fn begin(&self) -> InFlight<'_> {
        self.set_last_error(None);
        InFlight::start(&self.inner.in_flight)
    }

    /// Record a transport failure, if any, and convert it.
    fn settle<V>(&self, result: Result<V, TransportError>) -> Result<V, LifecycleError> {
        result.map_err(|e| {
            warn!(error = %e, "Complaint intent failed");
            self.set_last_error(Some(e.to_string()));
            LifecycleError::Transport(e)
        })
    }

    fn set_last_error(&self, message: Option<String>) {
        *self
            .inner
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = message;
    }
}
