//! Notification port

use zenkai_domain::Notification;

/// Shows transient messages to the user.
pub trait Notifier: Send + Sync {
    /// Displays `notification`.
    fn notify(&self, notification: Notification);
}
