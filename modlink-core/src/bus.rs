//! Notification bus collaborator.
//!
//! A bus broadcasts payloads on named channels and delivers them synchronously
//! to every observer registered for that name, on the posting thread.

use crate::message::Message;
use std::{
    any::Any,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// A type-erased value posted on a channel.
pub struct Payload(Box<dyn Any + Send + Sync>);

impl Payload {
    /// Wrap a message.
    pub fn new<M: Message>(message: M) -> Self {
        Self(Box::new(message))
    }

    /// Borrow the payload as `M`.
    pub fn downcast_ref<M: Message>(&self) -> Option<&M> {
        self.0.downcast_ref()
    }

    /// Check if the payload is an `M`.
    pub fn is<M: Message>(&self) -> bool {
        self.0.is::<M>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}

/// A posted notification, as seen by an observer.
#[derive(Debug, Clone, Copy)]
pub struct Notification<'a> {
    /// Channel name the payload was posted under.
    pub name: &'a str,
    /// The posted payload.
    pub payload: &'a Payload,
}

/// Identifies one observer across all the names it observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    /// Allocate a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Callback invoked for each notification an observer receives.
pub type ObserverFn = Arc<dyn Fn(Notification<'_>) + Send + Sync>;

/// Named-channel broadcast with synchronous delivery.
pub trait NotificationBus: Send + Sync {
    /// Deliver `payload` to every observer of `name` before returning.
    ///
    /// Posting to a name nobody observes is a no-op.
    fn post(&self, name: &str, payload: &Payload);

    /// Register `callback` for notifications posted under `name`.
    fn observe(&self, name: &str, observer: ObserverId, callback: ObserverFn);

    /// Remove every registration made by `observer`.
    fn stop_observing(&self, observer: ObserverId);
}

impl<B: NotificationBus + ?Sized> NotificationBus for Arc<B> {
    fn post(&self, name: &str, payload: &Payload) {
        (**self).post(name, payload)
    }

    fn observe(&self, name: &str, observer: ObserverId, callback: ObserverFn) {
        (**self).observe(name, observer, callback)
    }

    fn stop_observing(&self, observer: ObserverId) {
        (**self).stop_observing(observer)
    }
}
