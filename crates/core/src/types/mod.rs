//! Core types for ComplaintHub.
//!
//! This module provides type-safe wrappers for the complaint domain.

pub mod complaint;
pub mod draft;
pub mod id;
pub mod status;

pub use complaint::{Complaint, CreatedDate};
pub use draft::{ComplaintDraft, DraftField, ValidDraft, ValidationError, validate_draft};
pub use id::{ComplaintId, ComplaintIdError};
pub use status::*;
