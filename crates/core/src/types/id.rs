//! Server-issued complaint identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ComplaintId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplaintIdError {
    /// The input string is empty or only whitespace.
    #[error("complaint id cannot be empty")]
    Empty,
}

/// A complaint identifier.
///
/// Identifiers are assigned exactly once by the backend when a complaint is
/// created (conventionally `COMP-` followed by eight random characters) and
/// stay stable for the lifetime of the record. The client never invents one:
/// values come either from a backend response or from an administrator typing
/// an identifier they were given.
///
/// ## Examples
///
/// ```
/// use complaint_hub_core::ComplaintId;
///
/// assert!(ComplaintId::parse("COMP-AB12CD34").is_ok());
/// assert!(ComplaintId::parse("").is_err());
/// assert!(ComplaintId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Parse a `ComplaintId` from user input.
    ///
    /// Surrounding whitespace is removed; the identifier itself is otherwise
    /// opaque and not checked against the `COMP-` convention.
    ///
    /// # Errors
    ///
    /// Returns [`ComplaintIdError::Empty`] if the trimmed input is empty.
    pub fn parse(s: &str) -> Result<Self, ComplaintIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ComplaintIdError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ComplaintId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns `true` if the backend sent an empty identifier.
    ///
    /// Deserialization is transparent, so a malformed response can still
    /// produce an empty id; the transport rejects those.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ComplaintId {
    type Err = ComplaintIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ComplaintId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
