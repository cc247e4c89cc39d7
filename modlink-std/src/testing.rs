//! Testing utilities for modlink.
//!
//! This module provides utilities to make testing routers and components easier.
//!
//! # Features
//!
//! - [`RecordingNotifier`]: A notifier that records every user-facing message
//! - [`RecordingHandler`]: A channel handler that records every payload it receives
//! - [`CountingComponent`]: A component that counts how often its actions run

use modlink_core::{ActionTable, Component, Message, Params, Payload, UserNotifier};
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Notifier
// ============================================================================

/// A notifier that records all messages it is asked to show.
///
/// Clones share the same record, so keep one clone and hand the other to the
/// router.
///
/// # Example
///
/// ```rust,ignore
/// let notifier = RecordingNotifier::new();
/// let router = Router::builder().notifier(notifier.clone()).build()?;
///
/// router.open_module("Ghost", None, &Params::new()).unwrap_err();
/// assert_eq!(notifier.messages(), vec!["Undiscovered component!"]);
/// ```
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    /// Create an empty recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of the recorded messages.
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Get the number of recorded messages.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all recorded messages.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl UserNotifier for RecordingNotifier {
    fn notify_user(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A channel handler that records payloads of type `M`.
///
/// Payloads of any other type are counted but not stored.
pub struct RecordingHandler<M> {
    received: Arc<Mutex<Vec<M>>>,
    calls: Arc<AtomicUsize>,
}

impl<M: Message + Clone> RecordingHandler<M> {
    /// Create an empty recording handler.
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A callback suitable for `MessagingRelay::subscribe`.
    pub fn handler(&self) -> impl Fn(&Payload) + Send + Sync + 'static {
        let received = Arc::clone(&self.received);
        let calls = Arc::clone(&self.calls);
        move |payload: &Payload| {
            calls.fetch_add(1, Ordering::SeqCst);
            if let Some(message) = payload.downcast_ref::<M>() {
                received
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(message.clone());
            }
        }
    }

    /// Get a copy of the recorded payloads.
    pub fn received(&self) -> Vec<M> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of times the callback ran, whatever the payload type.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<M: Message + Clone> Default for RecordingHandler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for RecordingHandler<M> {
    fn clone(&self) -> Self {
        Self {
            received: Arc::clone(&self.received),
            calls: Arc::clone(&self.calls),
        }
    }
}

// ============================================================================
// Counting Component
// ============================================================================

/// A component that counts how often it is hit.
///
/// Actions:
/// - `action_hit`: increment the counter, respond with the new value
/// - `action_echo`: respond with the `value` parameter
/// - `action_fail`: return an error
#[derive(Debug)]
pub struct CountingComponent {
    hits: usize,
    last_params: Option<Params>,
}

impl CountingComponent {
    /// Create a component whose counter starts at `hits`.
    pub fn starting_at(hits: usize) -> Self {
        Self {
            hits,
            last_params: None,
        }
    }

    /// Current counter value.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Parameters of the most recent action.
    pub fn last_params(&self) -> Option<&Params> {
        self.last_params.as_ref()
    }
}

impl Default for CountingComponent {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl Component for CountingComponent {
    fn actions() -> ActionTable<Self> {
        ActionTable::new()
            .action("action_hit", |this: &mut Self, params: &Params| {
                this.hits += 1;
                this.last_params = Some(params.clone());
                this.hits
            })
            .action("action_echo", |this: &mut Self, params: &Params| {
                this.last_params = Some(params.clone());
                params.get("value").map(str::to_string)
            })
            .action("action_fail", |_: &mut Self, _: &Params| {
                Err::<(), _>("counting component refused")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_shares_record() {
        let notifier = RecordingNotifier::new();
        let clone = notifier.clone();
        clone.notify_user("hello");
        assert_eq!(notifier.messages(), vec!["hello".to_string()]);
        notifier.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_recording_handler_filters_by_type() {
        let recorder = RecordingHandler::<u32>::new();
        let handler = recorder.handler();
        handler(&Payload::new(7u32));
        handler(&Payload::new("not a number"));
        assert_eq!(recorder.received(), vec![7]);
        assert_eq!(recorder.calls(), 2);
    }
}
