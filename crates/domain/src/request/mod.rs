//! Outgoing API request description.
//!
//! Requests are described as data so the application layer never touches
//! an HTTP library directly. Paths are kept as raw segments; the transport
//! percent-encodes each segment when joining it onto the base URL.

mod body;
mod method;

pub use body::{FilePart, RequestBody};
pub use method::HttpMethod;

use serde::Serialize;

/// Where a request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// Path below the configured API base URL, as unencoded segments.
    Api(Vec<String>),
    /// A fully-qualified URL (pre-signed storage URLs).
    Absolute(String),
}

/// A request against the backend or an external storage URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Destination.
    pub target: RequestTarget,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Body.
    pub body: RequestBody,
    /// Whether the session cookie should accompany the request.
    pub with_credentials: bool,
}

impl ApiRequest {
    /// Creates a request for a path below the API base URL.
    #[must_use]
    pub fn new(method: HttpMethod, segments: &[&str]) -> Self {
        Self {
            method,
            target: RequestTarget::Api(segments.iter().map(ToString::to_string).collect()),
            query: Vec::new(),
            body: RequestBody::None,
            with_credentials: true,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Get, segments)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Post, segments)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Put, segments)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(segments: &[&str]) -> Self {
        Self::new(HttpMethod::Delete, segments)
    }

    /// Creates a request for an absolute URL. Credentials are not attached.
    #[must_use]
    pub fn absolute(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            target: RequestTarget::Absolute(url.into()),
            query: Vec::new(),
            body: RequestBody::None,
            with_credentials: false,
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Serializes `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented as JSON.
    pub fn with_json<T: Serialize>(self, value: &T) -> Result<Self, serde_json::Error> {
        let json = serde_json::to_value(value)?;
        Ok(self.with_body(RequestBody::Json(json)))
    }

    /// Drops the session cookie from this request.
    #[must_use]
    pub const fn anonymous(mut self) -> Self {
        self.with_credentials = false;
        self
    }

    /// Returns a printable path for logs.
    #[must_use]
    pub fn display_path(&self) -> String {
        match &self.target {
            RequestTarget::Api(segments) => format!("/{}", segments.join("/")),
            RequestTarget::Absolute(url) => url.split('?').next().unwrap_or(url).to_string(),
        }
    }
}
