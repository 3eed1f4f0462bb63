//! Complaint commands.
//!
//! These are the presentation layer: they build a controller per invocation,
//! issue one intent, then print the refreshed list. Admin gating for status
//! updates happens here, not in the controller.

use complaint_hub_client::{
    AdminGate, ClientConfig, ComplaintTransport, HttpTransport, LifecycleController,
};
use complaint_hub_core::{Category, Complaint, ComplaintDraft, ComplaintStatus};
use secrecy::SecretString;
use tracing::{info, warn};

use super::render;
use super::{CommandError, OutputFormat};

fn controller(config: &ClientConfig) -> Result<LifecycleController<HttpTransport>, CommandError> {
    let transport = HttpTransport::from_config(config)?;
    info!(api_url = %transport.base_url(), "Using complaints backend");
    Ok(LifecycleController::new(transport))
}

/// Register a complaint, print its id, then show the refreshed list.
///
/// # Errors
///
/// Returns an error if the draft is invalid or a backend call fails.
pub async fn register(draft: &ComplaintDraft, format: OutputFormat) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let controller = controller(&config)?;

    let complaint = controller.register(draft).await?;
    info!(
        complaint_id = %complaint.complaint_id,
        "Complaint registered successfully"
    );
    render::registered(&complaint);

    controller.refresh().await?;
    render::complaints(&controller.complaints(), format)
}

/// Fetch and print every complaint.
///
/// # Errors
///
/// Returns an error if the backend cannot be reached or answers badly.
pub async fn list(format: OutputFormat) -> Result<(), CommandError> {
    let config = ClientConfig::from_env()?;
    let controller = controller(&config)?;

    controller.refresh().await?;
    render::complaints(&controller.complaints(), format)
}

/// Update a complaint's status after passing the admin gate.
///
/// The status is parsed before anything else so an unknown value never
/// reaches the backend.
///
/// # Errors
///
/// Returns an error for an unknown status, a missing admin secret, a rejected
/// password, an empty id, or a failed backend call.
pub async fn set_status(
    complaint_id: &str,
    status: &str,
    password: String,
    format: OutputFormat,
) -> Result<(), CommandError> {
    let status: ComplaintStatus = status.parse()?;

    let config = ClientConfig::from_env()?;
    let secret = config.require_admin_secret()?;

    let controller = controller(&config)?;
    let updated = gated_set_status(&controller, secret, password, complaint_id, status).await?;
    info!(
        complaint_id = %updated.complaint_id,
        status = %updated.status,
        "Complaint status updated"
    );

    if let Some(error) = controller.last_error() {
        warn!(%error, "Showing last known list; refresh failed");
    }
    render::complaints(&controller.complaints(), format)
}

/// Run `password` through an [`AdminGate`] for `secret`, then update the
/// status. Nothing is sent unless the gate accepts the password; the session
/// ends when the update returns.
async fn gated_set_status<T: ComplaintTransport>(
    controller: &LifecycleController<T>,
    secret: &SecretString,
    password: String,
    complaint_id: &str,
    status: ComplaintStatus,
) -> Result<Complaint, CommandError> {
    let mut gate = AdminGate::new(secret.clone());
    gate.set_candidate(password);
    gate.submit();
    gate.require_authenticated()?;

    let result = controller.set_status(complaint_id, status).await;
    gate.logout();
    Ok(result?)
}

/// Print the accepted categories.
pub fn categories() {
    render::categories(&Category::ALL);
}
