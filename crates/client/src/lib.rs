//! ComplaintHub Client - complaint lifecycle and synchronization.
//!
//! This crate sits between the presentation layer and the complaints backend:
//!
//! - [`transport`] - [`ComplaintTransport`] seam and the `reqwest`-based
//!   [`HttpTransport`]
//! - [`controller`] - [`LifecycleController`], the single owner of the
//!   client's authoritative complaint list
//! - [`admin_gate`] - [`AdminGate`], the local shared-secret check that
//!   presentation consults before status updates
//! - [`config`] - [`ClientConfig`] loaded from the environment
//!
//! # Flow
//!
//! 1. Presentation issues an intent (register, refresh, set status)
//! 2. The controller validates it and calls the transport
//! 3. On success the controller updates its list from the server's response
//! 4. The caller receives a `Result` either way; nothing is retried

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod admin_gate;
pub mod config;
pub mod controller;
pub mod transport;

pub use admin_gate::{AdminGate, AdminGateError, AdminState};
pub use config::{ClientConfig, ConfigError};
pub use controller::{ControllerView, LifecycleController, LifecycleError};
pub use transport::{ComplaintTransport, HttpTransport, TransportError};
