//! Domain error types

use thiserror::Error;

/// Domain-level errors raised by client-side validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required form field was left empty.
    #[error("{0}")]
    MissingField(String),

    /// The password and its confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The terms of service were not accepted.
    #[error("You must agree to the Terms of Service and Privacy Policy")]
    TermsNotAccepted,

    /// A numeric form value could not be parsed or is out of range.
    #[error("invalid number for {field}: {value}")]
    InvalidNumber {
        /// Form field name.
        field: String,
        /// The rejected input.
        value: String,
    },

    /// A photo exceeded the upload size limit.
    #[error("File size must be less than {limit_mb}MB")]
    FileTooLarge {
        /// Limit in megabytes.
        limit_mb: usize,
    },

    /// A photo had no content.
    #[error("Selected file is empty")]
    EmptyFile,

    /// An unknown pose identifier was supplied.
    #[error("unknown pose: {0}")]
    UnknownPose(String),

    /// An unknown time range was supplied.
    #[error("unknown time range: {0}")]
    UnknownTimeRange(String),

    /// The catalog does not contain the named muscle group.
    #[error("muscle group not found: {0}")]
    UnknownMuscleGroup(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
