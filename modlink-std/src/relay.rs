//! # Messaging Relay
//!
//! Named-channel publish/subscribe layered over a [`NotificationBus`].
//!
//! Producers publish a payload under a tag; consumers subscribe a handler for
//! a tag. Each tag holds exactly one handler: subscribing again replaces it.
//! The relay registers itself with the bus once per tag, so delivery is
//! single-handler and happens synchronously inside `publish`.

use crate::bus::LocalBus;
use modlink_core::{Message, Notification, NotificationBus, ObserverFn, ObserverId, Payload};
use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

/// A channel handler.
pub type InformationHandler = Arc<dyn Fn(&Payload) + Send + Sync>;

type HandlerMap = Arc<Mutex<HashMap<String, InformationHandler>>>;

/// Publish/subscribe over a notification bus.
///
/// Dropping the relay (or calling [`teardown`](Self::teardown)) removes its
/// observer from every name on the bus.
pub struct MessagingRelay {
    bus: Arc<dyn NotificationBus>,
    observer: ObserverId,
    handlers: HandlerMap,
    torn_down: AtomicBool,
}

impl MessagingRelay {
    /// Create a relay over its own [`LocalBus`].
    pub fn new() -> Self {
        Self::with_bus(Arc::new(LocalBus::new()))
    }

    /// Create a relay over an existing bus.
    pub fn with_bus(bus: Arc<dyn NotificationBus>) -> Self {
        Self {
            bus,
            observer: ObserverId::next(),
            handlers: Arc::new(Mutex::new(HashMap::new())),
            torn_down: AtomicBool::new(false),
        }
    }

    /// Post `payload` under `tag`.
    ///
    /// The handler subscribed for `tag`, if any, runs before this returns.
    pub fn publish<M: Message>(&self, tag: &str, payload: M) {
        self.bus.post(tag, &Payload::new(payload));
    }

    /// Register `handler` for `tag`, replacing any previous handler.
    pub fn subscribe<F>(&self, tag: &str, handler: F)
    where
        F: Fn(&Payload) + Send + Sync + 'static,
    {
        if self.torn_down.load(Ordering::Acquire) {
            #[cfg(feature = "tracing")]
            tracing::debug!(tag = %tag, "relay torn down, subscription ignored");
            return;
        }

        let handler: InformationHandler = Arc::new(handler);
        let replaced = lock(&self.handlers).insert(tag.to_string(), handler);
        if replaced.is_none() {
            self.bus.observe(tag, self.observer, self.deliver());
        }
    }

    /// Check if a handler is subscribed for `tag`.
    pub fn is_subscribed(&self, tag: &str) -> bool {
        lock(&self.handlers).contains_key(tag)
    }

    /// Tags with a subscribed handler, sorted.
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = lock(&self.handlers).keys().cloned().collect();
        tags.sort_unstable();
        tags
    }

    /// Stop observing every name on the bus and drop all handlers.
    ///
    /// Later subscriptions are ignored. Calling this more than once is harmless.
    pub fn teardown(&self) {
        if self.torn_down.swap(true, Ordering::AcqRel) {
            return;
        }
        self.bus.stop_observing(self.observer);
        // Handlers drop after the guard is released.
        let handlers = std::mem::take(&mut *lock(&self.handlers));
        drop(handlers);
    }

    /// The observer callback registered with the bus.
    fn deliver(&self) -> ObserverFn {
        let handlers = Arc::clone(&self.handlers);
        Arc::new(move |notification: Notification<'_>| {
            let handler = lock(&handlers).get(notification.name).cloned();
            if let Some(handler) = handler {
                #[cfg(feature = "tracing")]
                tracing::debug!(tag = %notification.name, "delivering payload");
                handler(notification.payload);
            }
        })
    }
}

impl Default for MessagingRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MessagingRelay {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for MessagingRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessagingRelay")
            .field("observer", &self.observer)
            .field("tags", &self.tags())
            .finish_non_exhaustive()
    }
}

fn lock(handlers: &HandlerMap) -> MutexGuard<'_, HashMap<String, InformationHandler>> {
    handlers.lock().unwrap_or_else(PoisonError::into_inner)
}
