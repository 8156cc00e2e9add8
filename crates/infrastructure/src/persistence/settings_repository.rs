//! Client settings persistence.
//!
//! Stores the client configuration in the platform-specific config directory:
//! - Linux: ~/.config/zenkai/settings.json
//! - macOS: ~/Library/Application Support/zenkai/settings.json
//! - Windows: %APPDATA%/zenkai/settings.json
//!
//! Environment variables override the file.

use std::path::PathBuf;

use tokio::fs;
use tracing::debug;
use zenkai_domain::{ClientConfig, DomainError, GoogleOAuthConfig, request_timeout};

use crate::serialization::{SerializationError, from_json_bytes, to_pretty_json};

/// Overrides the backend base URL.
pub const ENV_API_URL: &str = "ZENKAI_API_URL";
/// Overrides the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "ZENKAI_TIMEOUT_MS";
/// Overrides the Google OAuth client id.
pub const ENV_GOOGLE_CLIENT_ID: &str = "ZENKAI_GOOGLE_CLIENT_ID";
/// Overrides the Google OAuth redirect URI.
pub const ENV_GOOGLE_REDIRECT_URI: &str = "ZENKAI_GOOGLE_REDIRECT_URI";

/// Settings could not be read, written or applied.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read or written.
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid.
    #[error("settings file: {0}")]
    Serialization(#[from] SerializationError),

    /// A value parsed but cannot be used.
    #[error("unusable setting: {0}")]
    Invalid(#[from] DomainError),

    /// The platform has no per-user configuration directory.
    #[error("no configuration directory for this user")]
    NoConfigDir,

    /// An override had an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Repository for the client settings file.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    dir: Option<PathBuf>,
}

impl Default for SettingsRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsRepository {
    /// Uses the platform config directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: dirs::config_dir().map(|p| p.join("zenkai")),
        }
    }

    /// Uses an explicit directory.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Returns the path where settings are stored, if available.
    #[must_use]
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|p| p.join("settings.json"))
    }

    /// Loads settings from disk.
    ///
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<ClientConfig, SettingsError> {
        let Some(path) = self.settings_path() else {
            return Ok(ClientConfig::default());
        };
        if !fs::try_exists(&path).await? {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(ClientConfig::default());
        }
        let content = fs::read(&path).await?;
        Ok(from_json_bytes(&content)?)
    }

    /// Saves settings to disk, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a value is unusable, there is no config
    /// directory, or the write fails.
    pub async fn save(&self, config: &ClientConfig) -> Result<(), SettingsError> {
        config.validate()?;
        let (Some(dir), Some(path)) = (self.dir.as_ref(), self.settings_path()) else {
            return Err(SettingsError::NoConfigDir);
        };
        fs::create_dir_all(dir).await?;
        fs::write(&path, to_pretty_json(config)?).await?;
        Ok(())
    }

    /// Loads the file and applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or an override is invalid.
    pub async fn load_with_env(&self) -> Result<ClientConfig, SettingsError> {
        let config = self.load().await?;
        EnvOverrides::from_env().apply(config)
    }
}

/// Configuration values supplied through environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// `ZENKAI_API_URL`
    pub api_url: Option<String>,
    /// `ZENKAI_TIMEOUT_MS`
    pub timeout_ms: Option<String>,
    /// `ZENKAI_GOOGLE_CLIENT_ID`
    pub google_client_id: Option<String>,
    /// `ZENKAI_GOOGLE_REDIRECT_URI`
    pub google_redirect_uri: Option<String>,
}

impl EnvOverrides {
    /// Reads the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads variables through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_url: get(ENV_API_URL),
            timeout_ms: get(ENV_TIMEOUT_MS),
            google_client_id: get(ENV_GOOGLE_CLIENT_ID),
            google_redirect_uri: get(ENV_GOOGLE_REDIRECT_URI),
        }
    }

    /// Applies the overrides on top of `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for a non-numeric or zero timeout, or when
    /// Google sign-in ends up with only one of its two settings.
    pub fn apply(self, mut config: ClientConfig) -> Result<ClientConfig, SettingsError> {
        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }
        if let Some(raw) = self.timeout_ms {
            config.request_timeout_ms = raw
                .trim()
                .parse()
                .ok()
                .filter(|ms| request_timeout(*ms).is_ok())
                .ok_or(SettingsError::InvalidValue {
                    key: ENV_TIMEOUT_MS.to_string(),
                    value: raw,
                })?;
        }
        if self.google_client_id.is_some() || self.google_redirect_uri.is_some() {
            let current = config.google.take();
            let client_id = self
                .google_client_id
                .or_else(|| current.as_ref().map(|g| g.client_id.clone()));
            let redirect_uri = self
                .google_redirect_uri
                .or_else(|| current.as_ref().map(|g| g.redirect_uri.clone()));
            config.google = match (client_id, redirect_uri) {
                (Some(client_id), Some(redirect_uri)) => Some(GoogleOAuthConfig {
                    client_id,
                    redirect_uri,
                }),
                (None, _) => {
                    return Err(SettingsError::InvalidValue {
                        key: ENV_GOOGLE_CLIENT_ID.to_string(),
                        value: String::new(),
                    });
                }
                (_, None) => {
                    return Err(SettingsError::InvalidValue {
                        key: ENV_GOOGLE_REDIRECT_URI.to_string(),
                        value: String::new(),
                    });
                }
            };
        }
        Ok(config)
    }
}
