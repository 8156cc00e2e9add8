//! Reading photos from disk for upload.

use std::path::Path;

use tokio::fs;
use zenkai_domain::PhotoUpload;

/// Error type for photo loading.
#[derive(Debug, thiserror::Error)]
pub enum PhotoFileError {
    /// IO error while reading the file.
    #[error("could not read {path}: {source}")]
    Io {
        /// The file that failed.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The path has no file name component.
    #[error("not a file: {0}")]
    NotAFile(String),

    /// The file is not an image.
    #[error("{path} is not an image ({content_type})")]
    NotAnImage {
        /// The rejected file.
        path: String,
        /// Guessed content type.
        content_type: String,
    },
}

/// Reads an image, guessing its content type from the extension.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an image type.
pub async fn load_photo(path: &Path) -> Result<PhotoUpload, PhotoFileError> {
    let display = path.display().to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| PhotoFileError::NotAFile(display.clone()))?;

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime::IMAGE {
        return Err(PhotoFileError::NotAnImage {
            path: display,
            content_type: mime.essence_str().to_string(),
        });
    }

    let bytes = fs::read(path).await.map_err(|source| PhotoFileError::Io {
        path: display,
        source,
    })?;
    Ok(PhotoUpload {
        file_name,
        content_type: mime.essence_str().to_string(),
        bytes,
    })
}
