//! Zenkai UI - Page layer
//!
//! Framework-independent pages for the Zenkai Gains client: routes and their
//! redirect policies, page view-models, and the controller that turns front
//! end commands into use case calls and page updates.

pub mod bridge;
mod channels;
mod controller;
pub mod router;
pub mod state;

pub use bridge::{UiCommand, UiUpdate};
pub use channels::{ChannelNotifier, NavigationQueue};
pub use controller::{ACCOUNT_VERIFIED, Controller, MAX_REDIRECTS, REGISTRATION_SENT};
pub use router::{HOME_PATH, LOGIN_PATH, Route};
pub use state::{CatalogState, ProfileState, ProgressState, VaultState};
