//! Navigation port

/// Issues navigation commands.
///
/// `replace` swaps the current route without leaving a history entry, which
/// is how redirects and post-logout navigation behave.
pub trait Navigator: Send + Sync {
    /// Replaces the current route with `route`.
    fn replace(&self, route: &str);
}
