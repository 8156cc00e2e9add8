//! Session handling for the Zenkai client.
//!
//! This module provides:
//! - The session prober that classifies `/auth/me`
//! - The shared auth store every page subscribes to
//! - The per-page redirect gate

mod gate;
mod prober;
mod store;

pub use gate::{GateState, GateView, LOGIN_REQUIRED_MESSAGE, RedirectGate};
pub use prober::{ProbeOutcome, SessionProber};
pub use store::AuthStore;
