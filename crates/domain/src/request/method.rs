//! Request methods the backend routes on.

use std::fmt;

/// HTTP method of an [`ApiRequest`](super::ApiRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Reads: lists, profiles, the session probe.
    Get,
    /// Creates, plus login, logout and uploads.
    Post,
    /// Renames and profile saves; storage uploads.
    Put,
    /// Removals.
    Delete,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true for methods that change server state.
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
