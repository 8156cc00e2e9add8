//! Zenkai Domain - Core business types
//!
//! This crate defines the domain model for the Zenkai Gains client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod catalog;
pub mod error;
pub mod notification;
pub mod profile;
pub mod progress;
pub mod request;
pub mod response;
pub mod settings;
pub mod transformation;

pub use auth::{
    AuthSnapshot, AuthStatus, LoginCredentials, RedirectPolicy, Registration,
    RegistrationRequest, RouteRequirement, SessionIdentity,
};
pub use catalog::{Catalog, MuscleGroup};
pub use error::{DomainError, DomainResult};
pub use notification::{Notification, NotificationLevel};
pub use profile::{PictureUploaded, ProfileForm, ProfileUpdate, PublicProfile, UserProfile};
pub use progress::{TimeRange, WeightLog, WeightSeries, WorkoutForm, WorkoutLog, weight_entry};
pub use request::{ApiRequest, FilePart, HttpMethod, RequestBody, RequestTarget};
pub use response::{ApiResponse, StatusCode};
pub use settings::{ClientConfig, GoogleOAuthConfig, request_timeout};
pub use transformation::{
    GroupedTransformations, MAX_PHOTO_BYTES, PhotoUpload, Pose, SignedImageUrl, Transformation,
    TransformationRecord, UploadSlot, UploadUrlRequest,
};
