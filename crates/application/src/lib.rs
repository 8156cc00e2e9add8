//! Zenkai Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (transport, navigation, notifications, time)
//! - The shared auth store, session prober and redirect gate
//! - One use case per backend flow
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod testing;

pub use auth::{
    AuthStore, GateState, GateView, LOGIN_REQUIRED_MESSAGE, ProbeOutcome, RedirectGate,
    SessionProber,
};
pub use error::{ApplicationError, ApplicationResult, UploadStep};
pub use ports::{ApiClient, Clock, Navigator, Notifier};
pub use use_cases::{
    LoadPublicProfile, Login, ManageCatalog, ManageProfile, PendingTransformation, ProgressLogs,
    Register, RequestPasswordReset, TrackProgress, TransformationVault,
};
