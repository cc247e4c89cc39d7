//! In-process notification bus.

use modlink_core::{Notification, NotificationBus, ObserverFn, ObserverId, Payload};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A [`NotificationBus`] that delivers on the posting thread.
///
/// `post` snapshots the observers of a name, releases the lock and then runs
/// the callbacks in registration order, so a callback may itself post,
/// observe or stop observing.
#[derive(Default)]
pub struct LocalBus {
    observers: Mutex<HashMap<String, Vec<(ObserverId, ObserverFn)>>>,
}

impl LocalBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of observers registered for `name`.
    pub fn observer_count(&self, name: &str) -> usize {
        self.observers().get(name).map_or(0, Vec::len)
    }

    /// Check if nobody observes anything.
    pub fn is_empty(&self) -> bool {
        self.observers().is_empty()
    }

    fn observers(&self) -> MutexGuard<'_, HashMap<String, Vec<(ObserverId, ObserverFn)>>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationBus for LocalBus {
    fn post(&self, name: &str, payload: &Payload) {
        let callbacks: Vec<ObserverFn> = match self.observers().get(name) {
            Some(list) => list.iter().map(|(_, cb)| cb.clone()).collect(),
            None => return,
        };

        let notification = Notification { name, payload };
        for callback in callbacks {
            callback(notification);
        }
    }

    fn observe(&self, name: &str, observer: ObserverId, callback: ObserverFn) {
        self.observers()
            .entry(name.to_string())
            .or_default()
            .push((observer, callback));
    }

    fn stop_observing(&self, observer: ObserverId) {
        let mut observers = self.observers();
        observers.retain(|_, list| {
            list.retain(|(id, _)| *id != observer);
            !list.is_empty()
        });
    }
}

impl std::fmt::Debug for LocalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let observers = self.observers();
        let mut names: Vec<&str> = observers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("LocalBus").field("names", &names).finish()
    }
}
