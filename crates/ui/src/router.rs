//! Client routes and the auth requirement of each page.

use std::fmt;

use zenkai_domain::RedirectPolicy;

/// Where an anonymous visitor is sent from a protected page.
pub const LOGIN_PATH: &str = "/login";
/// Where a signed-in user is sent from an anonymous-only page.
pub const HOME_PATH: &str = "/home";

/// A page of the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Landing,
    /// `/login`, with `?verified=true` after email verification.
    Login {
        /// The account was just verified.
        verified: bool,
    },
    /// `/register`
    Register,
    /// `/home`
    Home,
    /// `/admin`
    Admin,
    /// `/progress`
    Progress,
    /// `/measurements`
    Measurements,
    /// `/profile`
    Profile,
    /// `/public/profile/{username}`
    PublicProfile(String),
    /// `/transformation-vault`
    TransformationVault,
}

impl Route {
    /// Parses a path, ignoring unknown query parameters.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = path.trim_end_matches('/');
        let route = match path {
            "" => Self::Landing,
            "/login" => Self::Login {
                verified: query
                    .split('&')
                    .any(|pair| pair.eq_ignore_ascii_case("verified=true")),
            },
            "/register" => Self::Register,
            "/home" => Self::Home,
            "/admin" => Self::Admin,
            "/progress" => Self::Progress,
            "/measurements" => Self::Measurements,
            "/profile" => Self::Profile,
            "/transformation-vault" | "/photo-vault" => Self::TransformationVault,
            other => {
                let username = other.strip_prefix("/public/profile/")?;
                if username.is_empty() || username.contains('/') {
                    return None;
                }
                Self::PublicProfile(username.to_string())
            }
        };
        Some(route)
    }

    /// Canonical path.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_string(),
            Self::Login { .. } => LOGIN_PATH.to_string(),
            Self::Register => "/register".to_string(),
            Self::Home => HOME_PATH.to_string(),
            Self::Admin => "/admin".to_string(),
            Self::Progress => "/progress".to_string(),
            Self::Measurements => "/measurements".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::PublicProfile(username) => format!("/public/profile/{username}"),
            Self::TransformationVault => "/transformation-vault".to_string(),
        }
    }

    /// The redirect policy the page mounts with, if it has one.
    #[must_use]
    pub fn policy(&self) -> Option<RedirectPolicy> {
        match self {
            Self::Landing | Self::Login { .. } => {
                Some(RedirectPolicy::require_unauthenticated(HOME_PATH).without_redirect())
            }
            Self::Register => Some(RedirectPolicy::require_unauthenticated(HOME_PATH)),
            Self::Home
            | Self::Admin
            | Self::Progress
            | Self::Measurements
            | Self::Profile
            | Self::TransformationVault => Some(RedirectPolicy::require_authenticated(LOGIN_PATH)),
            Self::PublicProfile(_) => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
