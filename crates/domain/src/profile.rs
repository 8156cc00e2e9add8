//! User profile types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Database id, when the backend includes it.
    #[serde(default)]
    pub id: Option<i64>,
    /// Public handle.
    pub username: String,
    /// Account email. Not every profile endpoint returns it.
    #[serde(default)]
    pub email: Option<String>,
    /// Avatar location.
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    /// Free-form biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Gamified level.
    #[serde(default)]
    pub power_level: u32,
    /// Account creation time.
    #[serde(default)]
    pub joined_date: Option<NaiveDateTime>,
    /// Number of completed workouts.
    #[serde(default)]
    pub completed_workouts: u32,
}

impl UserProfile {
    /// Level shown on the home screen; profiles start at level 1.
    #[must_use]
    pub fn display_level(&self) -> u32 {
        self.power_level.max(1)
    }
}

/// Profile fields as edited in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    /// Public handle.
    pub username: String,
    /// Biography.
    pub bio: String,
}

impl ProfileForm {
    /// Seeds the form from a loaded profile.
    #[must_use]
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone(),
            bio: profile.bio.clone().unwrap_or_default(),
        }
    }

    /// Produces the update body with the given picture URL.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the username is blank.
    pub fn into_update(self, profile_picture_url: String) -> DomainResult<ProfileUpdate> {
        if self.username.trim().is_empty() {
            return Err(DomainError::MissingField(
                "Username cannot be empty".to_string(),
            ));
        }
        Ok(ProfileUpdate {
            username: self.username,
            bio: self.bio,
            profile_picture_url,
        })
    }
}

/// Body of `PUT /auth/profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Public handle.
    pub username: String,
    /// Biography.
    pub bio: String,
    /// Avatar location.
    pub profile_picture_url: String,
}

/// Profile as any visitor sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    /// Public handle.
    pub username: String,
    /// Avatar location.
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    /// Biography.
    #[serde(default)]
    pub bio: Option<String>,
    /// Gamified level.
    #[serde(default)]
    pub power_level: u32,
    /// Account creation time.
    #[serde(default)]
    pub joined_date: Option<NaiveDateTime>,
    /// Number of completed workouts.
    #[serde(default)]
    pub completed_workouts: u32,
}

/// Response of the profile picture upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PictureUploaded {
    /// Where the uploaded picture is served from.
    pub public_url: String,
}
