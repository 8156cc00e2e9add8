//! Session and redirect types

use serde::{Deserialize, Serialize};

/// Role name the backend assigns to catalog administrators.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Tri-state authentication status.
///
/// Starts as `Unknown` and only ever moves to a resolved value; re-checks
/// go straight from one resolved value to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthStatus {
    /// The session probe has not resolved yet.
    #[default]
    Unknown,
    /// The backend accepted the session cookie.
    Authenticated,
    /// No valid session (rejected, missing, or unreachable backend).
    Unauthenticated,
}

impl AuthStatus {
    /// Returns true once the status is no longer `Unknown`.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// `None` while unknown, otherwise whether the session is authenticated.
    #[must_use]
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Authenticated => Some(true),
            Self::Unauthenticated => Some(false),
        }
    }
}

/// A point-in-time view of the shared authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    /// Current status.
    pub status: AuthStatus,
    /// True only right after an explicit logout.
    pub is_logout: bool,
}

/// Identity returned by the session probe endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Account email.
    pub email: String,
    /// Granted roles, e.g. `ROLE_USER`, `ROLE_ADMIN`.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl SessionIdentity {
    /// Returns true if the account may administer the workout catalog.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }
}

/// What a page requires of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteRequirement {
    /// The page is only for signed-in users.
    RequireAuthenticated,
    /// The page is only for anonymous visitors (login, register).
    RequireUnauthenticated,
}

/// A page's declared redirect behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPolicy {
    /// Required session state.
    pub requirement: RouteRequirement,
    /// When false the page only observes the auth state.
    pub should_redirect: bool,
    /// Route to navigate to on mismatch.
    pub target: String,
}

impl RedirectPolicy {
    /// A page that sends anonymous visitors to `target`.
    #[must_use]
    pub fn require_authenticated(target: impl Into<String>) -> Self {
        Self {
            requirement: RouteRequirement::RequireAuthenticated,
            should_redirect: true,
            target: target.into(),
        }
    }

    /// A page that sends signed-in users to `target`.
    #[must_use]
    pub fn require_unauthenticated(target: impl Into<String>) -> Self {
        Self {
            requirement: RouteRequirement::RequireUnauthenticated,
            should_redirect: true,
            target: target.into(),
        }
    }

    /// Keeps the requirement but never navigates.
    #[must_use]
    pub fn without_redirect(mut self) -> Self {
        self.should_redirect = false;
        self
    }

    /// Returns true if `status` contradicts the requirement.
    ///
    /// An unresolved status never mismatches.
    #[must_use]
    pub fn is_mismatch(&self, status: AuthStatus) -> bool {
        status.as_option().is_some_and(|authenticated| {
            authenticated != (self.requirement == RouteRequirement::RequireAuthenticated)
        })
    }
}
