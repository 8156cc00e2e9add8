//! Navigator and notifier adapters that feed the controller.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info};
use zenkai_application::{Navigator, Notifier};
use zenkai_domain::Notification;

use crate::bridge::UiUpdate;

/// Collects navigation commands until the controller mounts them.
#[derive(Debug, Default)]
pub struct NavigationQueue {
    pending: Mutex<VecDeque<String>>,
}

impl NavigationQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the most recent pending route, discarding older ones.
    ///
    /// A later replace supersedes an earlier one that was never mounted.
    pub fn take(&self) -> Option<String> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let latest = pending.pop_back();
        pending.clear();
        latest
    }

    /// Returns true if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Navigator for NavigationQueue {
    fn replace(&self, route: &str) {
        debug!(route, "navigation queued");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(route.to_string());
    }
}

/// Forwards notifications to the front end as toasts.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    update_tx: mpsc::UnboundedSender<UiUpdate>,
}

impl ChannelNotifier {
    /// Creates a notifier writing to `update_tx`.
    #[must_use]
    pub const fn new(update_tx: mpsc::UnboundedSender<UiUpdate>) -> Self {
        Self { update_tx }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        info!(level = notification.level.tag(), message = %notification.message, "notify");
        let _ = self.update_tx.send(UiUpdate::Notify(notification));
    }
}
