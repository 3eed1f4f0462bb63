//! Local admin gate for status updates.
//!
//! The gate is a single shared-secret comparison with no network component,
//! no expiry and no persistence. It is consulted by the presentation layer
//! before it issues a status update; the lifecycle controller itself never
//! checks it.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, warn};

/// Admin session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminState {
    #[default]
    Unauthenticated,
    Authenticated,
}

/// Errors returned when a gated action is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminGateError {
    /// The admin has not logged in.
    #[error("admin authentication required")]
    NotAuthenticated,
}

/// Admin session plus the candidate password being typed.
///
/// Implements `Debug` manually so neither the secret nor the candidate ever
/// reaches a log line.
pub struct AdminGate {
    secret: SecretString,
    candidate: String,
    state: AdminState,
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("secret", &"[REDACTED]")
            .field("candidate", &"[REDACTED]")
            .field("state", &self.state)
            .finish()
    }
}

impl AdminGate {
    /// Create an unauthenticated gate for the configured secret.
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            candidate: String::new(),
            state: AdminState::Unauthenticated,
        }
    }

    #[must_use]
    pub const fn state(&self) -> AdminState {
        self.state
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, AdminState::Authenticated)
    }

    /// Replace the candidate password being entered.
    pub fn set_candidate(&mut self, candidate: impl Into<String>) {
        self.candidate = candidate.into();
    }

    #[must_use]
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Compare `candidate` against the secret.
    ///
    /// On a match the gate becomes `Authenticated` and `true` is returned. A
    /// mismatch returns `false` and leaves the current state untouched.
    pub fn attempt(&mut self, candidate: &str) -> bool {
        if constant_time_compare(candidate, self.secret.expose_secret()) {
            self.state = AdminState::Authenticated;
            info!("Admin authenticated");
            true
        } else {
            warn!("Admin authentication failed");
            false
        }
    }

    /// Attempt with the candidate held in the session.
    pub fn submit(&mut self) -> bool {
        let candidate = std::mem::take(&mut self.candidate);
        let accepted = self.attempt(&candidate);
        self.candidate = candidate;
        accepted
    }

    /// Return to `Unauthenticated` and forget the candidate.
    pub fn logout(&mut self) {
        self.state = AdminState::Unauthenticated;
        self.candidate.clear();
        info!("Admin logged out");
    }

    /// Gate check for presentation code about to issue a status update.
    ///
    /// # Errors
    ///
    /// Returns [`AdminGateError::NotAuthenticated`] unless logged in.
    pub const fn require_authenticated(&self) -> Result<(), AdminGateError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AdminGateError::NotAuthenticated)
        }
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AdminGate {
        AdminGate::new(SecretString::from("k7#Qm2!vR9"))
    }

    #[test]
    fn test_starts_unauthenticated() {
        let gate = gate();
        assert_eq!(gate.state(), AdminState::Unauthenticated);
        assert_eq!(
            gate.require_authenticated(),
            Err(AdminGateError::NotAuthenticated)
        );
    }

    #[test]
    fn test_correct_secret_then_logout() {
        let mut gate = gate();
        assert!(gate.attempt("k7#Qm2!vR9"));
        assert_eq!(gate.state(), AdminState::Authenticated);
        assert!(gate.require_authenticated().is_ok());

        gate.logout();
        assert_eq!(gate.state(), AdminState::Unauthenticated);
    }

    #[test]
    fn test_wrong_secret_stays_unauthenticated() {
        let mut gate = gate();
        assert!(!gate.attempt("k7#Qm2!vR8"));
        assert!(!gate.attempt(""));
        assert!(!gate.attempt("k7#Qm2!vR9 "));
        assert_eq!(gate.state(), AdminState::Unauthenticated);
    }

    #[test]
    fn test_wrong_secret_does_not_log_out() {
        let mut gate = gate();
        assert!(gate.attempt("k7#Qm2!vR9"));
        assert!(!gate.attempt("nope"));
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_submit_uses_candidate() {
        let mut gate = gate();
        gate.set_candidate("wrong");
        assert!(!gate.submit());
        assert_eq!(gate.candidate(), "wrong");

        gate.set_candidate("k7#Qm2!vR9");
        assert!(gate.submit());
        assert!(gate.is_authenticated());

        gate.logout();
        assert_eq!(gate.candidate(), "");
    }

    #[test]
    fn test_debug_redacts() {
        let mut gate = gate();
        gate.set_candidate("typed-so-far");
        let debug = format!("{gate:?}");
        assert!(!debug.contains("k7#Qm2!vR9"));
        assert!(!debug.contains("typed-so-far"));
        assert!(debug.contains("Unauthenticated"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "hell"));
        assert!(!constant_time_compare("hello", "world"));
    }
}
