//! Transformation vault page state.

use std::collections::HashMap;

use zenkai_application::{ApplicationError, PendingTransformation};
use zenkai_domain::{GroupedTransformations, Notification};

/// Banner text when the upload form is incomplete.
pub const UPLOAD_MISSING_INPUT: &str = "Please select an image and pose";
/// Banner text after a successful upload.
pub const UPLOAD_SUCCEEDED: &str = "Progress photo uploaded successfully!";

/// Gallery, signed URL cache and upload status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultState {
    /// Photos grouped by pose.
    pub gallery: GroupedTransformations,
    /// Signed URLs by object name, kept while the page is mounted.
    pub urls: HashMap<String, String>,
    /// A stored photo whose record still needs saving.
    pub pending: Option<PendingTransformation>,
    /// Inline upload message.
    pub banner: Option<Notification>,
}

impl VaultState {
    /// Replaces the gallery.
    pub fn set_gallery(&mut self, gallery: GroupedTransformations) {
        self.gallery = gallery;
    }

    /// Cached signed URL for an image.
    #[must_use]
    pub fn cached_url(&self, object_name: &str) -> Option<&str> {
        self.urls.get(object_name).map(String::as_str)
    }

    /// Caches a signed URL.
    pub fn remember_url(&mut self, object_name: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(object_name.into(), url.into());
    }

    /// Records a completed upload.
    pub fn upload_succeeded(&mut self) {
        self.pending = None;
        self.banner = Some(Notification::success(UPLOAD_SUCCEEDED));
    }

    /// Records a failed upload, keeping a resumable record if there is one.
    pub fn upload_failed(&mut self, err: &ApplicationError) {
        self.pending = err.pending_transformation().cloned();
        self.banner = Some(Notification::error(err.to_string()));
    }

    /// Records an upload rejected before any request.
    pub fn upload_rejected(&mut self, message: impl Into<String>) {
        self.banner = Some(Notification::error(message));
    }
}
