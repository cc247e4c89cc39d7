//! User-facing alert collaborator.

/// Displays a short message to the user.
///
/// The router calls this when a component or action cannot be found, or when
/// an inbound URL is malformed. Implementations decide how to present it
/// (alert dialog, toast, log line).
///
/// Closures implement this trait:
///
/// ```rust,ignore
/// let router = Router::builder()
///     .notifier(|message: &str| eprintln!("warning: {message}"))
///     .build()?;
/// ```
pub trait UserNotifier: Send + Sync {
    /// Show `message` to the user.
    fn notify_user(&self, message: &str);
}

impl<F> UserNotifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify_user(&self, message: &str) {
        (self)(message)
    }
}
