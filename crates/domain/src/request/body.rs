//! Request body types

/// A file attached to a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name the file is sent under.
    pub field: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// JSON document
    Json(serde_json::Value),
    /// Multipart form with a single file part
    Multipart(FilePart),
    /// Raw bytes with an explicit content type (storage uploads)
    Binary {
        /// The content type header value.
        content_type: String,
        /// The payload.
        bytes: Vec<u8>,
    },
}

impl RequestBody {
    /// Returns whether the body is empty.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type if applicable.
    ///
    /// Multipart bodies return `None`; the transport sets the boundary.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::None | Self::Multipart(_) => None,
            Self::Json(_) => Some("application/json"),
            Self::Binary { content_type, .. } => Some(content_type),
        }
    }
}
