//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait implemented by adapters in the infrastructure or UI layer.

mod api_client;
mod clock;
mod navigator;
mod notifier;

pub use api_client::{ApiClient, fetch_json, send_ok};
pub use clock::Clock;
pub use navigator::Navigator;
pub use notifier::Notifier;
