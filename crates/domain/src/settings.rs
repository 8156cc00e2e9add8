//! Client configuration
//!
//! Defines where the backend lives and how long requests may take.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Google sign-in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleOAuthConfig {
    /// OAuth client id.
    pub client_id: String,
    /// Backend callback URL registered with Google.
    pub redirect_uri: String,
}

/// Configuration for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Public route the client returns to after logout.
    #[serde(default = "default_landing_route")]
    pub landing_route: String,

    /// Google sign-in, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<GoogleOAuthConfig>,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_request_timeout_ms() -> u64 {
    15_000
}

fn default_landing_route() -> String {
    "/".to_string()
}

/// Converts a configured timeout into a `Duration`.
///
/// # Errors
///
/// Returns `InvalidNumber` for zero, which would expire every request
/// before it is sent.
pub fn request_timeout(timeout_ms: u64) -> DomainResult<Duration> {
    if timeout_ms == 0 {
        return Err(DomainError::InvalidNumber {
            field: "request_timeout_ms".to_string(),
            value: timeout_ms.to_string(),
        });
    }
    Ok(Duration::from_millis(timeout_ms))
}

impl ClientConfig {
    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns the first unusable value.
    pub fn validate(&self) -> DomainResult<()> {
        request_timeout(self.request_timeout_ms).map(drop)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_ms: default_request_timeout_ms(),
            landing_route: default_landing_route(),
            google: None,
        }
    }
}
