//! Page view-models.
//!
//! Each state is owned by the controller, reset when its page mounts, and
//! sent to the front end as a snapshot after every change.

mod catalog_state;
mod profile_state;
mod progress_state;
mod vault_state;

pub use catalog_state::CatalogState;
pub use profile_state::{PROFILE_SAVE_FAILED, PROFILE_SAVED, ProfileState};
pub use progress_state::ProgressState;
pub use vault_state::{UPLOAD_MISSING_INPUT, UPLOAD_SUCCEEDED, VaultState};
