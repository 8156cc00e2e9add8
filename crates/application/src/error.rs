//! Application error types

use thiserror::Error;
use zenkai_domain::{DomainError, StatusCode};

use crate::use_cases::PendingTransformation;

/// Step of the transformation upload pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadStep {
    /// Requesting a pre-signed upload URL.
    RequestUrl,
    /// Sending the bytes to object storage.
    Storage,
    /// Recording the uploaded photo with the backend.
    Persist,
}

impl UploadStep {
    /// Short description used in messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::RequestUrl => "requesting upload URL",
            Self::Storage => "uploading to storage",
            Self::Persist => "saving transformation",
        }
    }
}

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Client-side validation failed.
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// The request never produced a response (connection failure or timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the session.
    #[error("{message}")]
    Unauthorized {
        /// Status returned (401 or 403).
        status: StatusCode,
        /// Message shown to the user.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Http {
        /// Status returned.
        status: StatusCode,
        /// Server-provided text, or a fallback.
        message: String,
    },

    /// A step of the photo upload failed.
    #[error("Upload failed while {}: {message}", step.describe())]
    Upload {
        /// Failing step.
        step: UploadStep,
        /// Cause.
        message: String,
        /// Record that can be saved again without re-uploading, when the
        /// bytes already reached storage.
        pending: Option<PendingTransformation>,
    },

    /// A response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApplicationError {
    /// Builds the error for a non-success response, preferring the server's text.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str, fallback: &str) -> Self {
        let message = if body.trim().is_empty() {
            fallback.to_string()
        } else {
            body.trim().to_string()
        };
        if status.is_auth_error() {
            Self::Unauthorized { status, message }
        } else {
            Self::Http { status, message }
        }
    }

    /// Status code carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Upload step that failed, if this is an upload error.
    #[must_use]
    pub const fn upload_step(&self) -> Option<UploadStep> {
        match self {
            Self::Upload { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The resumable record of a failed upload.
    #[must_use]
    pub const fn pending_transformation(&self) -> Option<&PendingTransformation> {
        match self {
            Self::Upload { pending, .. } => pending.as_ref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApplicationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
