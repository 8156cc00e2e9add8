//! Zenkai Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod auth;
pub mod persistence;
pub mod serialization;

pub use adapters::{PhotoFileError, ReqwestApiClient, SystemClock, load_photo};
pub use auth::{GOOGLE_AUTH_ENDPOINT, google_authorization_url};
pub use persistence::{EnvOverrides, SettingsError, SettingsRepository};
pub use serialization::{SerializationError, from_json_bytes, to_pretty_json};
