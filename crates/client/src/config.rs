//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `COMPLAINTS_ADMIN_SECRET` - Shared secret checked by the admin gate
//!   (required only for status updates)
//! - `COMPLAINTS_API_URL` - Complaints collection URL
//!   (default: `http://localhost:8080/api/complaints`)
//! - `COMPLAINTS_HTTP_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Default collection URL of the complaints backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/complaints";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// ComplaintHub client configuration.
///
/// Implements `Debug` manually to redact the admin secret.
#[derive(Clone)]
pub struct ClientConfig {
    /// Complaints collection URL
    pub api_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Shared admin secret (unset disables status updates)
    pub admin_secret: Option<SecretString>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .field(
                "admin_secret",
                &self.admin_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the admin secret is set but looks like a
    /// placeholder, or if the URL or timeout cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("COMPLAINTS_API_URL", DEFAULT_API_URL))?;
        let timeout_secs = get_env_or_default(
            "COMPLAINTS_HTTP_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("COMPLAINTS_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let admin_secret = get_optional_env("COMPLAINTS_ADMIN_SECRET")
            .map(|value| {
                let secret = SecretString::from(value);
                validate_secret(&secret, "COMPLAINTS_ADMIN_SECRET").map(|()| secret)
            })
            .transpose()?;

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            admin_secret,
        })
    }

    /// Build a configuration directly, validating the URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a non-HTTP(S) URL.
    pub fn new(api_url: &str, admin_secret: Option<SecretString>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            admin_secret,
        })
    }

    /// The admin secret, for operations that need the admin gate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `COMPLAINTS_ADMIN_SECRET` is unset.
    pub fn require_admin_secret(&self) -> Result<&SecretString, ConfigError> {
        self.admin_secret
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("COMPLAINTS_ADMIN_SECRET".to_string()))
    }
}

/// Parse the collection URL; only `http` and `https` are accepted.
fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar("COMPLAINTS_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "COMPLAINTS_API_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject empty secrets and obvious placeholders.
fn validate_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.trim().is_empty() {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
