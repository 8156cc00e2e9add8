//! Shared authentication state.
//!
//! One store exists per client. Pages never own auth state; they read
//! snapshots or subscribe to the watch channel. Every mutation replaces the
//! whole snapshot, so subscribers never see `status` and `is_logout` out of
//! step with each other.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use zenkai_domain::{ApiRequest, AuthSnapshot, AuthStatus, Notification};

use super::prober::{ProbeOutcome, SessionProber};
use crate::ports::{ApiClient, Navigator, Notifier};
use crate::{ApplicationError, ApplicationResult};

struct Inner {
    prober: SessionProber,
    client: Arc<dyn ApiClient>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    landing_route: String,
    state: watch::Sender<AuthSnapshot>,
}

/// Tri-state session store with login, logout and re-check operations.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<Inner>,
}

impl AuthStore {
    /// Creates a store in the `Unknown` state without probing.
    #[must_use]
    pub fn new(
        client: Arc<dyn ApiClient>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        landing_route: impl Into<String>,
    ) -> Self {
        let (state, _) = watch::channel(AuthSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                prober: SessionProber::new(client.clone()),
                client,
                navigator,
                notifier,
                landing_route: landing_route.into(),
                state,
            }),
        }
    }

    /// Creates the store and runs the initial session check.
    pub async fn init(
        client: Arc<dyn ApiClient>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        landing_route: impl Into<String>,
    ) -> Self {
        let store = Self::new(client, navigator, notifier, landing_route);
        store.check_auth().await;
        store
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        *self.inner.state.borrow()
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.snapshot().status
    }

    /// Receives every future snapshot.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.inner.state.subscribe()
    }

    /// The prober this store uses.
    #[must_use]
    pub fn prober(&self) -> &SessionProber {
        &self.inner.prober
    }

    /// Re-checks the session. Never navigates.
    pub async fn check_auth(&self) -> AuthStatus {
        let outcome = self.inner.prober.probe_outcome().await;
        if let ProbeOutcome::Unreachable(err) = &outcome {
            self.inner
                .notifier
                .notify(Notification::error("Failed to check authentication"));
            warn!(error = %err, "auth check failed");
        }
        let status = outcome.status();
        self.inner.state.send_modify(|snapshot| {
            snapshot.status = status;
            if status == AuthStatus::Authenticated {
                snapshot.is_logout = false;
            }
        });
        info!(?status, "auth checked");
        status
    }

    /// Confirms a fresh login with the backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the session is not valid; the store is then
    /// `Unauthenticated`.
    pub async fn login(&self) -> ApplicationResult<()> {
        let outcome = self.inner.prober.probe_outcome().await;
        match outcome {
            ProbeOutcome::Accepted => {
                self.publish(AuthSnapshot {
                    status: AuthStatus::Authenticated,
                    is_logout: false,
                });
                info!("login confirmed");
                Ok(())
            }
            ProbeOutcome::Rejected(status) => {
                self.mark_unauthenticated();
                Err(ApplicationError::Unauthorized {
                    status,
                    message: "Failed to verify login state".to_string(),
                })
            }
            ProbeOutcome::Unreachable(err) => {
                self.mark_unauthenticated();
                Err(err)
            }
        }
    }

    /// Ends the session. Failures are reported through the notifier and
    /// leave the state untouched.
    ///
    /// Returns whether the logout went through.
    pub async fn logout(&self) -> bool {
        let request = ApiRequest::post(&["auth", "logout"]);
        match self.inner.client.send(request).await {
            Ok(response) if response.is_success() => {
                self.publish(AuthSnapshot {
                    status: AuthStatus::Unauthenticated,
                    is_logout: true,
                });
                info!("logged out");
                self.inner
                    .notifier
                    .notify(Notification::success("Successfully logged out"));
                self.inner.navigator.replace(&self.inner.landing_route);
                true
            }
            Ok(response) => {
                warn!(status = %response.status, "logout rejected");
                self.inner
                    .notifier
                    .notify(Notification::error("Failed to logout"));
                false
            }
            Err(err) => {
                warn!(error = %err, "logout failed");
                self.inner.notifier.notify(Notification::error(err.to_string()));
                false
            }
        }
    }

    fn mark_unauthenticated(&self) {
        self.inner
            .state
            .send_modify(|snapshot| snapshot.status = AuthStatus::Unauthenticated);
    }

    fn publish(&self, snapshot: AuthSnapshot) {
        self.inner.state.send_replace(snapshot);
    }
}
