//! File-backed persistence

mod settings_repository;

pub use settings_repository::{EnvOverrides, SettingsError, SettingsRepository};
