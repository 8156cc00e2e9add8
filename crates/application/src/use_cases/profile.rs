//! Own profile editing and public profile lookup.

use std::sync::Arc;

use tracing::info;
use zenkai_domain::{
    ApiRequest, DomainError, PhotoUpload, PictureUploaded, ProfileForm, PublicProfile,
    RequestBody, UserProfile,
};

use crate::ports::{ApiClient, fetch_json};
use crate::ApplicationResult;

const PROFILE: &[&str] = &["auth", "profile"];

/// Multipart field the picture upload endpoint reads.
const PICTURE_FIELD: &str = "profilePicture";

/// Loads and saves the signed-in user's profile.
#[derive(Clone)]
pub struct ManageProfile {
    client: Arc<dyn ApiClient>,
}

impl ManageProfile {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the profile.
    ///
    /// # Errors
    ///
    /// Returns the transport or status error.
    pub async fn load(&self) -> ApplicationResult<UserProfile> {
        fetch_json(
            self.client.as_ref(),
            ApiRequest::get(PROFILE),
            "Failed to fetch profile",
        )
        .await
    }

    /// Uploads a new avatar and returns its public URL.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or oversized file, or the
    /// server's rejection.
    pub async fn upload_picture(&self, picture: PhotoUpload) -> ApplicationResult<String> {
        picture.validate()?;
        let request = ApiRequest::post(&["api", "upload-profile-picture"])
            .with_body(RequestBody::Multipart(picture.into_part(PICTURE_FIELD)));
        let uploaded: PictureUploaded = fetch_json(
            self.client.as_ref(),
            request,
            "Failed to upload profile picture",
        )
        .await?;
        Ok(uploaded.public_url)
    }

    /// Saves the form, uploading `picture` first when one was chosen.
    ///
    /// Without a new picture the current URL is sent back unchanged.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank username before anything is
    /// sent, then the first failing step's error; nothing is saved if the
    /// upload fails.
    pub async fn save(
        &self,
        current: &UserProfile,
        form: ProfileForm,
        picture: Option<PhotoUpload>,
    ) -> ApplicationResult<UserProfile> {
        let mut update = form.into_update(String::new())?;
        update.profile_picture_url = match picture {
            Some(picture) => self.upload_picture(picture).await?,
            None => current.profile_picture_url.clone().unwrap_or_default(),
        };
        let request = ApiRequest::put(PROFILE).with_json(&update)?;
        let saved: UserProfile =
            fetch_json(self.client.as_ref(), request, "Failed to update profile").await?;
        info!(username = %saved.username, "profile saved");
        Ok(saved)
    }
}

/// Reads anyone's public profile.
#[derive(Clone)]
pub struct LoadPublicProfile {
    client: Arc<dyn ApiClient>,
}

impl LoadPublicProfile {
    /// Creates the use case.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches the public profile of `username`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank username without making a
    /// request, otherwise the transport or status error.
    pub async fn execute(&self, username: &str) -> ApplicationResult<PublicProfile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::MissingField("Username is required".to_string()).into());
        }
        fetch_json(
            self.client.as_ref(),
            ApiRequest::get(&["api", "public", "profile", username]).anonymous(),
            "Profile not found",
        )
        .await
    }
}
