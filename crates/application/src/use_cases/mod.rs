//! Use cases
//!
//! One use case per backend flow. Each owns a handle to the transport and
//! returns typed results; pages decide how failures are shown.

mod account;
mod catalog;
mod profile;
mod progress;
mod vault;

pub use account::{Login, Register, RequestPasswordReset};
pub use catalog::ManageCatalog;
pub use profile::{LoadPublicProfile, ManageProfile};
pub use progress::{ProgressLogs, TrackProgress};
pub use vault::{PendingTransformation, TransformationVault};
