//! Per-page redirect gate.
//!
//! A gate is created when a page mounts and evaluated against every auth
//! snapshot the page observes. It navigates at most once and never while
//! the session is still unknown.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;
use zenkai_domain::{AuthSnapshot, AuthStatus, Notification, RedirectPolicy, RouteRequirement};

use crate::ports::{Navigator, Notifier};

/// Message shown when a protected page bounces an anonymous visitor.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to view this page";

/// Lifecycle of one page mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Waiting for the first resolved status.
    #[default]
    Loading,
    /// The page may render.
    Rendering,
    /// A navigation was issued. Terminal.
    Redirected,
}

/// What the page needs to know to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateView {
    /// True while the status is unknown.
    pub is_auth_loading: bool,
    /// `None` while loading.
    pub is_authenticated: Option<bool>,
}

impl From<AuthSnapshot> for GateView {
    fn from(snapshot: AuthSnapshot) -> Self {
        Self {
            is_auth_loading: snapshot.status == AuthStatus::Unknown,
            is_authenticated: snapshot.status.as_option(),
        }
    }
}

/// Compares a page's requirement against the session and redirects on mismatch.
pub struct RedirectGate {
    policy: RedirectPolicy,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    state: GateState,
    notified: bool,
}

impl RedirectGate {
    /// Creates a gate for one page mount.
    #[must_use]
    pub fn new(
        policy: RedirectPolicy,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            policy,
            navigator,
            notifier,
            state: GateState::Loading,
            notified: false,
        }
    }

    /// The policy this gate enforces.
    #[must_use]
    pub const fn policy(&self) -> &RedirectPolicy {
        &self.policy
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> GateState {
        self.state
    }

    /// Evaluates a snapshot, navigating if the page must not be shown.
    pub fn evaluate(&mut self, snapshot: AuthSnapshot) -> GateView {
        let view = GateView::from(snapshot);
        if !snapshot.status.is_resolved() || self.state == GateState::Redirected {
            return view;
        }

        if self.policy.should_redirect && self.policy.is_mismatch(snapshot.status) {
            info!(target = %self.policy.target, status = ?snapshot.status, "redirecting");
            self.navigator.replace(&self.policy.target);
            self.state = GateState::Redirected;

            let needs_login = self.policy.requirement == RouteRequirement::RequireAuthenticated
                && snapshot.status == AuthStatus::Unauthenticated;
            if needs_login && !snapshot.is_logout && !self.notified {
                self.notified = true;
                self.notifier.notify(Notification::info(LOGIN_REQUIRED_MESSAGE));
            }
        } else {
            self.state = GateState::Rendering;
        }
        view
    }

    /// Waits for the first resolved snapshot on `receiver` and evaluates it.
    ///
    /// If the store is dropped first, the last published snapshot is used.
    pub async fn settle(&mut self, receiver: &mut watch::Receiver<AuthSnapshot>) -> GateView {
        let resolved = receiver
            .wait_for(|snapshot| snapshot.status.is_resolved())
            .await
            .map(|snapshot| *snapshot);
        let snapshot = match resolved {
            Ok(snapshot) => snapshot,
            Err(_) => *receiver.borrow(),
        };
        self.evaluate(snapshot)
    }
}
