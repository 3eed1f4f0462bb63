//! ComplaintHub Core - Complaint record model.
//!
//! This crate provides the types shared by every ComplaintHub component:
//! - `client` - Backend transport, lifecycle controller and admin gate
//! - `cli` - Command-line front end for citizens and administrators
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation - no I/O, no HTTP
//! clients. Identifiers and timestamps are always issued by the backend; this
//! crate only wraps them.
//!
//! # Modules
//!
//! - [`types`] - Complaint identifiers, statuses, categories, drafts and records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
