//! Session probe against `/auth/me`.

use std::sync::Arc;

use tracing::{debug, warn};
use zenkai_domain::{ApiRequest, AuthStatus, SessionIdentity, StatusCode};

use crate::ports::{ApiClient, fetch_json};
use crate::{ApplicationError, ApplicationResult};

const SESSION_PATH: &[&str] = &["auth", "me"];

/// Result of one probe, before it is folded into an [`AuthStatus`].
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The server accepted the session cookie.
    Accepted,
    /// The server answered with a non-success status.
    Rejected(StatusCode),
    /// No response arrived.
    Unreachable(ApplicationError),
}

impl ProbeOutcome {
    /// Folds the outcome into a resolved status.
    #[must_use]
    pub const fn status(&self) -> AuthStatus {
        match self {
            Self::Accepted => AuthStatus::Authenticated,
            Self::Rejected(_) | Self::Unreachable(_) => AuthStatus::Unauthenticated,
        }
    }
}

/// Asks the backend whether the current session is valid.
#[derive(Clone)]
pub struct SessionProber {
    client: Arc<dyn ApiClient>,
}

impl SessionProber {
    /// Creates a prober over the given transport.
    #[must_use]
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self { client }
    }

    /// Probes once. Never fails; transport problems count as unauthenticated.
    pub async fn probe(&self) -> AuthStatus {
        self.probe_outcome().await.status()
    }

    /// Probes once and keeps the reason for a negative answer.
    pub async fn probe_outcome(&self) -> ProbeOutcome {
        match self.client.send(ApiRequest::get(SESSION_PATH)).await {
            Ok(response) if response.is_success() => {
                debug!("session accepted");
                ProbeOutcome::Accepted
            }
            Ok(response) => {
                debug!(status = %response.status, "session rejected");
                ProbeOutcome::Rejected(response.status)
            }
            Err(err) => {
                warn!(error = %err, "session probe failed");
                ProbeOutcome::Unreachable(err)
            }
        }
    }

    /// Fetches the signed-in identity.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when there is no session, or a transport error.
    pub async fn identity(&self) -> ApplicationResult<SessionIdentity> {
        fetch_json(
            self.client.as_ref(),
            ApiRequest::get(SESSION_PATH),
            "Not authenticated",
        )
        .await
    }
}
