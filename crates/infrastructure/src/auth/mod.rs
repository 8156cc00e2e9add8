//! Third-party sign-in

mod google;

pub use google::{GOOGLE_AUTH_ENDPOINT, google_authorization_url};
