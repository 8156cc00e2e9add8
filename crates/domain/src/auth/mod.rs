//! Authentication domain types

mod credentials;
mod types;

pub use credentials::{LoginCredentials, Registration, RegistrationRequest};
pub use types::{
    ADMIN_ROLE, AuthSnapshot, AuthStatus, RedirectPolicy, RouteRequirement, SessionIdentity,
};
