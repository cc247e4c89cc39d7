//! Module registry: component factories and their live instances.
//!
//! Factories are registered up front (or at runtime) under a component name.
//! The first `resolve` of a name constructs the component and keeps it; later
//! resolves hand out the same instance until it is released.

use crate::notifiers::TracingNotifier;
use modlink_core::{
    Component, ComponentFn, DynComponent, Instance, RegistryError, RouterError, UserNotifier,
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock},
    thread::{self, ThreadId},
};

/// A zero-argument component constructor.
pub type Factory = Arc<dyn Fn() -> Box<dyn DynComponent> + Send + Sync>;

/// A shared handle to a live component.
///
/// The registry owns the instance; a handle only borrows it for the duration
/// of [`ComponentHandle::with`].
#[derive(Clone)]
pub struct ComponentHandle {
    name: Arc<str>,
    inner: Arc<Slot>,
}

/// A live component and the thread currently running it.
struct Slot {
    owner: Mutex<Option<ThreadId>>,
    component: Mutex<Box<dyn DynComponent>>,
}

/// Clears the slot owner when the component is released, even on unwind.
struct OwnerGuard<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for OwnerGuard<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl ComponentHandle {
    fn new(name: &str, component: Box<dyn DynComponent>) -> Self {
        Self {
            name: Arc::from(name),
            inner: Arc::new(Slot {
                owner: Mutex::new(None),
                component: Mutex::new(component),
            }),
        }
    }

    /// Name the component was resolved under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if two handles point at the same instance.
    pub fn ptr_eq(&self, other: &ComponentHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run `f` with exclusive access to the component.
    ///
    /// A call from another thread waits until the component is free. Fails
    /// with [`RouterError::ComponentBusy`] only when the calling thread is
    /// already running this component further up its stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn DynComponent) -> R) -> Result<R, RouterError> {
        let current = thread::current().id();
        if *self.owner() == Some(current) {
            return Err(RouterError::ComponentBusy(self.name.to_string()));
        }

        let mut guard = self
            .inner
            .component
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self.owner() = Some(current);
        // Declared after `guard`, so the owner is cleared before the component unlocks.
        let _owner = OwnerGuard(&self.inner.owner);
        Ok(f(&mut **guard))
    }

    /// Run `f` with the component downcast to `C`.
    ///
    /// Returns `Ok(None)` when the component is not a `C`.
    pub fn with_as<C, R>(&self, f: impl FnOnce(&mut C) -> R) -> Result<Option<R>, RouterError>
    where
        C: Component,
    {
        self.with(|component| component.downcast_mut::<C>().map(f))
    }

    fn owner(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.inner.owner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The process-wide table of component factories and live instances.
///
/// All methods take `&self`; internal locks are never held while a factory
/// or the notifier runs.
pub struct ModuleRegistry {
    factories: RwLock<HashMap<String, Factory>>,
    modules: Mutex<HashMap<String, ComponentHandle>>,
    notifier: Arc<dyn UserNotifier>,
}

impl ModuleRegistry {
    /// Create a builder.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Return the live instance for `name`, constructing it on first use.
    ///
    /// If no factory is registered under `name`, the user is told and
    /// [`RouterError::ComponentNotFound`] is returned; nothing is stored.
    pub fn resolve(&self, name: &str) -> Result<ComponentHandle, RouterError> {
        if let Some(handle) = self.modules().get(name) {
            return Ok(handle.clone());
        }

        let factory = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();

        let Some(factory) = factory else {
            let err = RouterError::ComponentNotFound(name.to_string());
            self.report(&err);
            return Err(err);
        };

        let created = ComponentHandle::new(name, factory());

        // Another caller may have constructed it while the factory ran; keep theirs.
        let (handle, lost) = {
            let mut modules = self.modules();
            match modules.get(name) {
                Some(existing) => (existing.clone(), Some(created)),
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(component = %name, "component created");
                    modules.insert(name.to_string(), created.clone());
                    (created, None)
                }
            }
        };

        // The losing instance drops here, outside the lock.
        drop(lost);
        Ok(handle)
    }

    /// Discard the live instance for `name`.
    ///
    /// Returns whether an instance was removed. The factory stays registered,
    /// so the next `resolve` constructs a fresh instance.
    pub fn release(&self, name: &str) -> bool {
        let removed = self.modules().remove(name);

        #[cfg(feature = "tracing")]
        {
            if removed.is_some() {
                tracing::debug!(component = %name, "component released");
            }
        }

        // Dropped here, outside the lock.
        removed.is_some()
    }

    /// Register a factory at runtime.
    pub fn register_factory<F>(&self, name: impl Into<String>, factory: F) -> Result<(), RegistryError>
    where
        F: Fn() -> Box<dyn DynComponent> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        if factories.contains_key(&name) {
            return Err(RegistryError::DuplicateComponent(name));
        }
        let factory: Factory = Arc::new(factory);
        factories.insert(name, factory);
        Ok(())
    }

    /// Check if a factory is registered under `name`.
    pub fn has_factory(&self, name: &str) -> bool {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Check if `name` currently has a live instance.
    pub fn contains(&self, name: &str) -> bool {
        self.modules().contains_key(name)
    }

    /// Names with a live instance, sorted.
    pub fn loaded(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Get the number of live instances.
    pub fn len(&self) -> usize {
        self.modules().len()
    }

    /// Check if no component is loaded.
    pub fn is_empty(&self) -> bool {
        self.modules().is_empty()
    }

    /// Get the notifier used for user-facing reports.
    pub fn notifier(&self) -> &Arc<dyn UserNotifier> {
        &self.notifier
    }

    pub(crate) fn report(&self, err: &RouterError) {
        if let Some(message) = err.user_message() {
            self.notifier.notify_user(message);
        }
    }

    fn modules(&self) -> MutexGuard<'_, HashMap<String, ComponentHandle>> {
        self.modules.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("loaded", &self.loaded())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// RegistryBuilder
// ============================================================================

/// Builder for constructing a [`ModuleRegistry`].
///
/// # Example
/// ```ignore
/// let registry = ModuleRegistry::builder()
///     .register::<Profile>("Profile")
///     .register_with("Cart", || Cart::with_capacity(8))
///     .notifier(|msg: &str| eprintln!("{msg}"))
///     .build()?;
/// ```
pub struct RegistryBuilder {
    factories: Vec<(String, Factory)>,
    notifier: Option<Arc<dyn UserNotifier>>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
            notifier: None,
        }
    }

    /// Register a component type constructed with `Default`.
    pub fn register<C: Component + Default>(self, name: impl Into<String>) -> Self {
        self.register_with(name, C::default)
    }

    /// Register a component type with a custom constructor.
    ///
    /// The action table is built once, here, and shared by every instance.
    pub fn register_with<C, F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        C: Component,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.register_with_mut(name, constructor);
        self
    }

    /// Register a component type with a custom constructor (mutable version).
    pub fn register_with_mut<C, F>(&mut self, name: impl Into<String>, constructor: F)
    where
        C: Component,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let actions = Arc::new(C::actions());
        let factory: Factory = Arc::new(move || {
            Box::new(Instance::new(constructor(), Arc::clone(&actions))) as Box<dyn DynComponent>
        });
        self.factories.push((name.into(), factory));
    }

    /// Register a plain factory function.
    pub fn register_fn(mut self, name: impl Into<String>, factory: ComponentFn) -> Self {
        self.register_fn_mut(name, factory);
        self
    }

    /// Register a plain factory function (mutable version).
    pub fn register_fn_mut(&mut self, name: impl Into<String>, factory: ComponentFn) {
        let factory: Factory = Arc::new(factory);
        self.factories.push((name.into(), factory));
    }

    /// Register every entry of a static perfect-hash table.
    #[cfg(feature = "phf")]
    pub fn register_table(mut self, table: &'static phf::Map<&'static str, ComponentFn>) -> Self {
        for (name, factory) in table.entries() {
            self.register_fn_mut(*name, *factory);
        }
        self
    }

    /// Set the user-facing notifier. Defaults to [`TracingNotifier`].
    pub fn notifier<N: UserNotifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Set an already shared notifier.
    pub fn shared_notifier(mut self, notifier: Arc<dyn UserNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Get the number of registered factories.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the builder has no factories.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build the registry.
    ///
    /// Fails if two factories share a name.
    pub fn build(self) -> Result<ModuleRegistry, RegistryError> {
        let mut factories = HashMap::with_capacity(self.factories.len());
        for (name, factory) in self.factories {
            if factories.contains_key(&name) {
                return Err(RegistryError::DuplicateComponent(name));
            }
            factories.insert(name, factory);
        }
        Ok(ModuleRegistry {
            factories: RwLock::new(factories),
            modules: Mutex::new(HashMap::new()),
            notifier: self
                .notifier
                .unwrap_or_else(|| Arc::new(TracingNotifier::new())),
        })
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingComponent, RecordingNotifier};
    use modlink_core::{ActionTable, Params};
    use std::{
        sync::{
            Weak,
            atomic::{AtomicUsize, Ordering},
            mpsc,
        },
        time::Duration,
    };

    fn registry(notifier: &RecordingNotifier) -> ModuleRegistry {
        ModuleRegistry::builder()
            .register::<CountingComponent>("Counter")
            .notifier(notifier.clone())
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_unknown_reports_and_stores_nothing() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        let err = registry.resolve("Ghost").unwrap_err();
        assert!(matches!(err, RouterError::ComponentNotFound(ref n) if n == "Ghost"));
        assert_eq!(notifier.messages(), vec!["Undiscovered component!".to_string()]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_resolve_is_identity_preserving() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        let first = registry.resolve("Counter").unwrap();
        let second = registry.resolve("Counter").unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(first.name(), "Counter");
        assert_eq!(registry.loaded(), vec!["Counter".to_string()]);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_release_twice() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        let first = registry.resolve("Counter").unwrap();
        assert!(registry.release("Counter"));
        assert!(!registry.release("Counter"));
        assert!(!registry.contains("Counter"));

        let fresh = registry.resolve("Counter").unwrap();
        assert!(!first.ptr_eq(&fresh));
    }

    #[test]
    fn test_handle_outlives_release() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        let handle = registry.resolve("Counter").unwrap();
        registry.release("Counter");
        let hits = handle
            .with(|c| c.perform("action_hit", &Params::new()).is_some())
            .unwrap();
        assert!(hits);
    }

    #[test]
    fn test_reentrant_access_is_busy() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        let handle = registry.resolve("Counter").unwrap();
        let inner = handle.with(|_| handle.with(|_| ())).unwrap();
        assert!(matches!(inner, Err(RouterError::ComponentBusy(ref n)) if n == "Counter"));
    }

    #[test]
    fn test_other_thread_waits_for_component() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);
        let handle = registry.resolve("Counter").unwrap();

        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let holder = {
            let handle = handle.clone();
            thread::spawn(move || {
                handle.with(|_| {
                    entered_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                })
            })
        };
        entered_rx.recv().unwrap();

        let waiter = {
            let handle = handle.clone();
            thread::spawn(move || {
                handle.with(|c| {
                    let response = c.perform("action_hit", &Params::new()).unwrap().unwrap();
                    response.downcast_ref::<usize>().copied()
                })
            })
        };
        thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();

        holder.join().unwrap().unwrap();
        assert_eq!(waiter.join().unwrap().unwrap(), Some(1));
    }

    #[test]
    fn test_with_as_downcasts() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        let handle = registry.resolve("Counter").unwrap();
        let hits = handle.with_as::<CountingComponent, _>(|c| c.hits()).unwrap();
        assert_eq!(hits, Some(0));

        struct Other;
        impl Component for Other {
            fn actions() -> ActionTable<Self> {
                ActionTable::new()
            }
        }
        assert_eq!(handle.with_as::<Other, _>(|_| ()).unwrap(), None);
    }

    #[test]
    fn test_duplicate_registration_fails_build() {
        let result = ModuleRegistry::builder()
            .register::<CountingComponent>("Counter")
            .register::<CountingComponent>("Counter")
            .build();
        assert_eq!(
            result.unwrap_err(),
            RegistryError::DuplicateComponent("Counter".to_string())
        );
    }

    #[test]
    fn test_runtime_registration() {
        let notifier = RecordingNotifier::new();
        let registry = registry(&notifier);

        assert!(!registry.has_factory("Late"));
        registry
            .register_factory("Late", modlink_core::construct::<CountingComponent>)
            .unwrap();
        assert!(registry.has_factory("Late"));
        assert!(registry.resolve("Late").is_ok());

        let dup = registry.register_factory("Counter", modlink_core::construct::<CountingComponent>);
        assert!(dup.is_err());
    }

    #[test]
    fn test_custom_constructor_shares_table() {
        let registry = ModuleRegistry::builder()
            .register_with("Preloaded", || CountingComponent::starting_at(5))
            .build()
            .unwrap();

        let handle = registry.resolve("Preloaded").unwrap();
        let hits = handle.with_as::<CountingComponent, _>(|c| c.hits()).unwrap();
        assert_eq!(hits, Some(5));
    }

    #[test]
    fn test_second_resolve_does_not_construct() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let registry = ModuleRegistry::builder()
            .register_with("Counter", move || {
                counter.fetch_add(1, Ordering::SeqCst);
                CountingComponent::default()
            })
            .build()
            .unwrap();

        registry.resolve("Counter").unwrap();
        registry.resolve("Counter").unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 1);

        registry.release("Counter");
        registry.resolve("Counter").unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 2);
    }

    /// Looks the registry up again while being dropped.
    struct Lookback {
        registry: Weak<ModuleRegistry>,
        dropped: Arc<AtomicUsize>,
    }

    impl Component for Lookback {
        fn actions() -> ActionTable<Self> {
            ActionTable::new()
        }
    }

    impl Drop for Lookback {
        fn drop(&mut self) {
            if let Some(registry) = self.registry.upgrade() {
                registry.contains("Racy");
            }
            self.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_losing_construction_drops_outside_lock() {
        let registry = Arc::new(ModuleRegistry::builder().build().unwrap());
        let calls = Arc::new(AtomicUsize::new(0));
        let dropped = Arc::new(AtomicUsize::new(0));

        let factory = {
            let weak = Arc::downgrade(&registry);
            let calls = Arc::clone(&calls);
            let dropped = Arc::clone(&dropped);
            move || {
                // The first construction resolves the same name, so it loses the race.
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    if let Some(registry) = weak.upgrade() {
                        registry.resolve("Racy").unwrap();
                    }
                }
                let component = Lookback {
                    registry: weak.clone(),
                    dropped: Arc::clone(&dropped),
                };
                Box::new(Instance::with_own_table(component)) as Box<dyn DynComponent>
            }
        };
        registry.register_factory("Racy", factory).unwrap();

        let winner = registry.resolve("Racy").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(dropped.load(Ordering::SeqCst), 1);
        assert!(winner.ptr_eq(&registry.resolve("Racy").unwrap()));
    }
}
