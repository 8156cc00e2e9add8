//! Transformation vault: progress photo gallery and the three-step upload.
//!
//! Uploading goes (1) ask the backend for a pre-signed URL, (2) PUT the bytes
//! straight to object storage, (3) record the photo with the backend. Each
//! step starts only after the previous one succeeded, and a failure names
//! the step. When only step 3 fails, the error carries the record so it can
//! be saved again without re-uploading.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};
use zenkai_domain::{
    ApiRequest, GroupedTransformations, HttpMethod, PhotoUpload, Pose, RequestBody,
    SignedImageUrl, Transformation, TransformationRecord, UploadSlot, UploadUrlRequest,
};

use crate::error::UploadStep;
use crate::ports::{ApiClient, fetch_json, send_ok};
use crate::{ApplicationError, ApplicationResult};

const TRANSFORMATION: &[&str] = &["api", "transformation"];

/// A photo already in storage whose record was not saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransformation {
    /// The record to save.
    pub record: TransformationRecord,
}

/// Gallery listing, signed URLs and uploads.
#[derive(Clone)]
pub struct TransformationVault {
    client: Arc<dyn ApiClient>,
}

impl TransformationVault {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches every stored photo grouped by pose.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn list(&self) -> ApplicationResult<GroupedTransformations> {
        let items: Vec<Transformation> = fetch_json(
            self.client.as_ref(),
            ApiRequest::get(TRANSFORMATION),
            "Failed to fetch transformations",
        )
        .await?;
        Ok(GroupedTransformations::group(items))
    }

    /// Resolves a short-lived URL for one stored image.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn image_url(&self, object_name: &str) -> ApplicationResult<String> {
        let request = ApiRequest::get(&["api", "transformation", "image-url"])
            .with_query("objectName", object_name);
        let signed: SignedImageUrl =
            fetch_json(self.client.as_ref(), request, "Failed to get signed URL").await?;
        Ok(signed.signed_url)
    }

    /// Uploads a photo and records it.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or oversized photo before any
    /// request, otherwise `ApplicationError::Upload` naming the failed step.
    pub async fn upload(
        &self,
        photo: PhotoUpload,
        pose: Pose,
        date: NaiveDate,
    ) -> ApplicationResult<TransformationRecord> {
        photo.validate()?;

        let slot = self
            .request_slot(&photo)
            .await
            .map_err(|err| step_failed(UploadStep::RequestUrl, &err, None))?;

        self.put_to_storage(&slot, photo)
            .await
            .map_err(|err| step_failed(UploadStep::Storage, &err, None))?;

        let record = TransformationRecord {
            image_key: slot.object_name,
            date,
            pose,
        };
        self.persist(&record).await.map_err(|err| {
            let pending = PendingTransformation {
                record: record.clone(),
            };
            step_failed(UploadStep::Persist, &err, Some(pending))
        })?;
        info!(key = %record.image_key, pose = %pose.as_str(), "transformation uploaded");
        Ok(record)
    }

    /// Saves the record of a photo that already reached storage.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Upload` at the persist step, carrying the
    /// record again.
    pub async fn retry_persist(
        &self,
        pending: PendingTransformation,
    ) -> ApplicationResult<TransformationRecord> {
        match self.persist(&pending.record).await {
            Ok(()) => Ok(pending.record),
            Err(err) => Err(step_failed(UploadStep::Persist, &err, Some(pending))),
        }
    }

    async fn request_slot(&self, photo: &PhotoUpload) -> ApplicationResult<UploadSlot> {
        let body = UploadUrlRequest {
            file_name: photo.file_name.clone(),
            content_type: photo.content_type.clone(),
        };
        let request =
            ApiRequest::post(&["api", "transformation", "upload-url"]).with_json(&body)?;
        fetch_json(self.client.as_ref(), request, "Failed to get upload URL").await
    }

    async fn put_to_storage(&self, slot: &UploadSlot, photo: PhotoUpload) -> ApplicationResult<()> {
        let request = ApiRequest::absolute(HttpMethod::Put, slot.upload_url.clone()).with_body(
            RequestBody::Binary {
                content_type: photo.content_type,
                bytes: photo.bytes,
            },
        );
        send_ok(self.client.as_ref(), request, "Failed to upload image").await?;
        Ok(())
    }

    async fn persist(&self, record: &TransformationRecord) -> ApplicationResult<()> {
        let request = ApiRequest::post(TRANSFORMATION).with_json(record)?;
        send_ok(self.client.as_ref(), request, "Failed to save transformation").await?;
        Ok(())
    }
}

fn step_failed(
    step: UploadStep,
    err: &ApplicationError,
    pending: Option<PendingTransformation>,
) -> ApplicationError {
    warn!(step = step.describe(), error = %err, "upload step failed");
    ApplicationError::Upload {
        step,
        message: err.to_string(),
        pending,
    }
}
