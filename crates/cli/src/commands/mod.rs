//! CLI command implementations.

pub mod complaints;
mod render;

use complaint_hub_client::{AdminGateError, ConfigError, LifecycleError, TransportError};
use complaint_hub_core::StatusParseError;
use thiserror::Error;

/// How complaint listings are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable columns
    Table,
    /// The backend records as pretty-printed JSON
    Json,
}

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP transport could not be set up.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A complaint intent failed.
    #[error("{0}")]
    Lifecycle(#[from] LifecycleError),

    /// The status argument is not `pending` or `resolved`.
    #[error("{0}")]
    InvalidStatus(#[from] StatusParseError),

    /// The admin password was not accepted.
    #[error("Invalid password: {0}")]
    AdminGate(#[from] AdminGateError),

    /// Output could not be serialized.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}
