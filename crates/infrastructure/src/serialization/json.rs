//! JSON encoding for files the client keeps on disk.
//!
//! Output is indented with two spaces and ends with a newline so the
//! settings file stays diff-friendly when edited by hand.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A file could not be encoded or decoded.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The value could not be encoded.
    #[error("could not encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The document is malformed or has the wrong shape.
    #[error("invalid JSON at line {line}, column {column}: {source}")]
    Decode {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Parser error.
        source: serde_json::Error,
    },
}

/// Encodes `value` as indented JSON followed by a newline.
///
/// # Errors
///
/// Returns `Encode` if the value cannot be represented as JSON.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut json = serde_json::to_string_pretty(value).map_err(SerializationError::Encode)?;
    json.push('\n');
    Ok(json)
}

/// Decodes a JSON document.
///
/// # Errors
///
/// Returns `Decode` with the position of the first problem.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(|source| SerializationError::Decode {
        line: source.line(),
        column: source.column(),
        source,
    })
}
