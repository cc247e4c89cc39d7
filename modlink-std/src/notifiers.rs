//! Standard [`UserNotifier`] implementations.

use modlink_core::UserNotifier;

/// A notifier that reports user-facing messages through `tracing`.
///
/// This is the default notifier for headless hosts and tests. Without the
/// `tracing` feature the messages are dropped.
#[derive(Debug, Clone, Copy)]
pub struct TracingNotifier {
    name: &'static str,
}

impl TracingNotifier {
    /// Create a new `TracingNotifier` with a default name.
    pub const fn new() -> Self {
        Self { name: "modlink" }
    }

    /// Create a new `TracingNotifier` with a custom name.
    ///
    /// The name is attached to every log line to identify the router.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl UserNotifier for TracingNotifier {
    fn notify_user(&self, message: &str) {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(router = %self.name, "{message}");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, message);
        }
    }
}

/// A notifier that discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl UserNotifier for SilentNotifier {
    fn notify_user(&self, _message: &str) {}
}
