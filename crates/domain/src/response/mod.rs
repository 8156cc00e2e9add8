//! Response types
//!
//! Contains the status code wrapper and the buffered response returned by
//! the transport.

use serde::de::DeserializeOwned;

/// Status code of a backend reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Wraps a raw code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Raw code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.0, 200..=299)
    }

    /// The session is missing or lacks the role (401 and 403).
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self.0, 401 | 403)
    }

    /// 409, used by the catalog for duplicate names.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        self.0 == 409
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let class = match self.0 {
            200..=299 => "success",
            400..=499 => "client error",
            500..=599 => "server error",
            _ => "unexpected",
        };
        write!(f, "{} ({class})", self.0)
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// Status code.
    pub status: StatusCode,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status: impl Into<StatusCode>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: status.into(),
            body: body.into(),
        }
    }

    /// Returns true for 2xx responses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
