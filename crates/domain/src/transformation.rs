//! Transformation vault: dated progress photos grouped by pose.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::request::FilePart;

/// Largest photo accepted for upload.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Bodybuilding pose a photo was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Pose {
    /// Front lat spread.
    FrontLatSpread,
    /// Side triceps.
    SideTriceps,
    /// Front double biceps.
    FrontDoubleBiceps,
    /// Rear lat spread.
    RearLatSpread,
    /// Back double biceps.
    BackDoubleBiceps,
    /// Side chest.
    SideChest,
    /// Most muscular.
    MostMuscular,
    /// Side chest, alternate label kept by the backend.
    SideChestPose,
    /// Freestyle.
    Freestyling,
}

impl Pose {
    /// All poses in display order.
    pub const ALL: [Self; 9] = [
        Self::FrontLatSpread,
        Self::SideTriceps,
        Self::FrontDoubleBiceps,
        Self::RearLatSpread,
        Self::BackDoubleBiceps,
        Self::SideChest,
        Self::MostMuscular,
        Self::SideChestPose,
        Self::Freestyling,
    ];

    /// Wire identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontLatSpread => "FRONT_LAT_SPREAD",
            Self::SideTriceps => "SIDE_TRICEPS",
            Self::FrontDoubleBiceps => "FRONT_DOUBLE_BICEPS",
            Self::RearLatSpread => "REAR_LAT_SPREAD",
            Self::BackDoubleBiceps => "BACK_DOUBLE_BICEPS",
            Self::SideChest => "SIDE_CHEST",
            Self::MostMuscular => "MOST_MUSCULAR",
            Self::SideChestPose => "SIDE_CHEST_POSE",
            Self::Freestyling => "FREESTYLING",
        }
    }

    /// Human label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontLatSpread => "Front Lat Spread",
            Self::SideTriceps => "Side Triceps",
            Self::FrontDoubleBiceps => "Front Double Biceps",
            Self::RearLatSpread => "Rear Lat Spread",
            Self::BackDoubleBiceps => "Back Double Biceps",
            Self::SideChest => "Side Chest",
            Self::MostMuscular => "Most Muscular",
            Self::SideChestPose => "Side Chest Pose",
            Self::Freestyling => "Freestyling",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pose {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownPose(s.to_string()))
    }
}

/// A stored progress photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    /// Database id.
    pub id: i64,
    /// Storage object key of the image.
    pub gcs_object_name: String,
    /// Day the photo was taken.
    pub date_taken: NaiveDate,
    /// Pose shown.
    pub pose: Pose,
}

/// Photos grouped by pose, groups in `Pose::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedTransformations {
    groups: Vec<(Pose, Vec<Transformation>)>,
}

impl GroupedTransformations {
    /// Groups photos by pose, keeping server order inside each group.
    #[must_use]
    pub fn group(items: Vec<Transformation>) -> Self {
        let mut groups: Vec<(Pose, Vec<Transformation>)> = Vec::new();
        for item in items {
            match groups.iter_mut().find(|(pose, _)| *pose == item.pose) {
                Some((_, list)) => list.push(item),
                None => groups.push((item.pose, vec![item])),
            }
        }
        groups.sort_by_key(|(pose, _)| *pose);
        Self { groups }
    }

    /// Returns true if there are no photos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Poses that have at least one photo.
    pub fn poses(&self) -> impl Iterator<Item = Pose> + '_ {
        self.groups.iter().map(|(pose, _)| *pose)
    }

    /// Photos for one pose.
    #[must_use]
    pub fn get(&self, pose: Pose) -> &[Transformation] {
        self.groups
            .iter()
            .find(|(p, _)| *p == pose)
            .map_or(&[], |(_, list)| list.as_slice())
    }

    /// Iterates groups in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Pose, &[Transformation])> {
        self.groups.iter().map(|(pose, list)| (*pose, list.as_slice()))
    }

    /// Total number of photos.
    #[must_use]
    pub fn total(&self) -> usize {
        self.groups.iter().map(|(_, list)| list.len()).sum()
    }
}

/// A photo selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    /// File name, used to derive the storage key.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Image bytes.
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    /// Checks the size limits.
    ///
    /// # Errors
    ///
    /// Returns `EmptyFile` or `FileTooLarge`.
    pub fn validate(&self) -> DomainResult<()> {
        if self.bytes.is_empty() {
            return Err(DomainError::EmptyFile);
        }
        if self.bytes.len() > MAX_PHOTO_BYTES {
            return Err(DomainError::FileTooLarge {
                limit_mb: MAX_PHOTO_BYTES / (1024 * 1024),
            });
        }
        Ok(())
    }

    /// Wraps the photo as a multipart file under `field`.
    #[must_use]
    pub fn into_part(self, field: impl Into<String>) -> FilePart {
        FilePart {
            field: field.into(),
            file_name: self.file_name,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

/// Body of `POST /api/transformation/upload-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    /// Original file name.
    pub file_name: String,
    /// MIME type the storage PUT will carry.
    pub content_type: String,
}

/// A pre-signed upload slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSlot {
    /// Pre-signed PUT URL.
    pub upload_url: String,
    /// Object key the image will be stored under.
    pub object_name: String,
}

/// Body of `POST /api/transformation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRecord {
    /// Object key returned with the upload slot.
    pub image_key: String,
    /// Day the photo was taken.
    pub date: NaiveDate,
    /// Pose shown.
    pub pose: Pose,
}

/// Response of `GET /api/transformation/image-url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedImageUrl {
    /// Short-lived GET URL.
    pub signed_url: String,
}
