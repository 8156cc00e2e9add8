//! Google sign-in.
//!
//! The client only builds the authorization URL. Google redirects back to
//! the backend, which exchanges the code and sets the session cookie.

use url::Url;
use zenkai_domain::GoogleOAuthConfig;

/// Google's OAuth 2.0 authorization endpoint.
pub const GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Builds the URL the user visits to sign in with Google.
///
/// # Errors
///
/// Returns an error if the endpoint cannot be parsed.
pub fn google_authorization_url(config: &GoogleOAuthConfig) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        GOOGLE_AUTH_ENDPOINT,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", "profile email"),
            ("access_type", "offline"),
            ("prompt", "consent"),
        ],
    )
}
