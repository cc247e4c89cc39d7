//! The router context object.
//!
//! A [`Router`] owns one module registry, the dispatcher and URL entry point
//! built over it, and one messaging relay. Create it once at start-up (or
//! once per test) and pass it to whoever needs to route.

use modlink_core::{
    Component, ComponentFn, DynComponent, Message, NotificationBus, Params, Payload,
    RegistryError, RouterError, UserNotifier,
};
use modlink_std::{
    ActionDispatcher, Dispatched, LocalBus, MessagingRelay, ModuleRegistry, RegistryBuilder,
    RouteRequest, Routed, RouterConfig, UrlEntry,
};
use std::sync::Arc;

/// Routes local calls, inbound URLs and channel messages between components.
///
/// # Example
///
/// ```rust,ignore
/// let router = Router::builder()
///     .register::<Profile>("Profile")
///     .build()?;
///
/// router.open_module("Profile", Some("action_show"), &Params::new())?;
/// router.perform_action("shop://Profile/show?id=7")?;
///
/// router.receive_information("cart", |payload| { ... });
/// router.send_information("cart", CartUpdated { items: 3 });
/// ```
#[derive(Debug)]
pub struct Router {
    config: RouterConfig,
    dispatcher: ActionDispatcher,
    entry: UrlEntry,
    relay: MessagingRelay,
}

impl Router {
    /// Create a builder.
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Resolve component `name` and run `action` on it with `params`.
    ///
    /// Local calls may name any action, including local-only ones.
    pub fn open_module(
        &self,
        name: &str,
        action: Option<&str>,
        params: &Params,
    ) -> Result<Dispatched, RouterError> {
        self.dispatcher.dispatch(name, action, params)
    }

    /// Like [`open_module`](Self::open_module), calling `on_resolved` with the
    /// instance before the action runs (to present it, configure it, ...).
    pub fn open_module_with<F>(
        &self,
        name: &str,
        action: Option<&str>,
        params: &Params,
        on_resolved: F,
    ) -> Result<Dispatched, RouterError>
    where
        F: FnOnce(&mut dyn DynComponent),
    {
        self.dispatcher.dispatch_with(name, action, params, on_resolved)
    }

    /// Route an inbound `scheme://target/action?k=v` URL.
    pub fn perform_action(&self, url: &str) -> Result<Routed, RouterError> {
        self.entry.handle(url)
    }

    /// Like [`perform_action`](Self::perform_action), with an `on_resolved` callback.
    pub fn perform_action_with<F>(&self, url: &str, on_resolved: F) -> Result<Routed, RouterError>
    where
        F: FnOnce(&mut dyn DynComponent),
    {
        self.entry.handle_with(url, on_resolved)
    }

    /// Parse an inbound URL and apply the security gate without dispatching.
    pub fn route_request(&self, url: &str) -> Result<Option<RouteRequest>, RouterError> {
        self.entry.request(url)
    }

    /// Discard the live instance of component `name`.
    pub fn release_module(&self, name: &str) -> bool {
        self.dispatcher.registry().release(name)
    }

    /// Publish `information` under `tag`.
    pub fn send_information<M: Message>(&self, tag: &str, information: M) {
        self.relay.publish(tag, information);
    }

    /// Subscribe `handler` to `tag`, replacing any previous handler.
    pub fn receive_information<F>(&self, tag: &str, handler: F)
    where
        F: Fn(&Payload) + Send + Sync + 'static,
    {
        self.relay.subscribe(tag, handler);
    }

    /// Get the module registry.
    pub fn registry(&self) -> &ModuleRegistry {
        self.dispatcher.registry()
    }

    /// Get the messaging relay.
    pub fn relay(&self) -> &MessagingRelay {
        &self.relay
    }

    /// Get the configuration the router was built with.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

// ============================================================================
// RouterBuilder
// ============================================================================

/// Builder for constructing a [`Router`].
pub struct RouterBuilder {
    config: RouterConfig,
    registry: RegistryBuilder,
    bus: Option<Arc<dyn NotificationBus>>,
    #[cfg(feature = "inventory")]
    collect: bool,
}

impl RouterBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: RouterConfig::default(),
            registry: RegistryBuilder::new(),
            bus: None,
            #[cfg(feature = "inventory")]
            collect: false,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the local-only action prefix (default `action_`).
    pub fn action_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.with_action_prefix(prefix);
        self
    }

    /// Restrict collected components to those submitted from crate `namespace`.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config = self.config.with_namespace(namespace);
        self
    }

    /// Set the user-facing notifier.
    pub fn notifier<N: UserNotifier + 'static>(mut self, notifier: N) -> Self {
        self.registry = self.registry.notifier(notifier);
        self
    }

    /// Set the notification bus the relay posts on. Defaults to a private [`LocalBus`].
    pub fn bus(mut self, bus: Arc<dyn NotificationBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Register a component type constructed with `Default`.
    pub fn register<C: Component + Default>(mut self, name: impl Into<String>) -> Self {
        self.registry = self.registry.register::<C>(name);
        self
    }

    /// Register a component type with a custom constructor.
    pub fn register_with<C, F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        C: Component,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.registry = self.registry.register_with(name, constructor);
        self
    }

    /// Register a plain factory function.
    pub fn register_fn(mut self, name: impl Into<String>, factory: ComponentFn) -> Self {
        self.registry = self.registry.register_fn(name, factory);
        self
    }

    /// Register every entry of a static perfect-hash table.
    #[cfg(feature = "phf")]
    pub fn static_components(
        mut self,
        table: &'static phf::Map<&'static str, ComponentFn>,
    ) -> Self {
        self.registry = self.registry.register_table(table);
        self
    }

    /// Register every component submitted with `register_component!`.
    ///
    /// When a namespace is configured, only submissions from that crate are kept.
    #[cfg(feature = "inventory")]
    pub fn collect_components(mut self) -> Self {
        self.collect = true;
        self
    }

    /// Build the router.
    ///
    /// Fails if two components share a name.
    pub fn build(self) -> Result<Router, RegistryError> {
        #[cfg(feature = "inventory")]
        let registry = if self.collect {
            self.registry.register_collected(&self.config)
        } else {
            self.registry
        };
        #[cfg(not(feature = "inventory"))]
        let registry = self.registry;

        let registry = Arc::new(registry.build()?);
        let dispatcher = ActionDispatcher::new(registry);
        let entry = UrlEntry::new(dispatcher.clone(), self.config.action_prefix.as_str());
        let relay = match self.bus {
            Some(bus) => MessagingRelay::with_bus(bus),
            None => MessagingRelay::with_bus(Arc::new(LocalBus::new())),
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            prefix = %self.config.action_prefix,
            namespace = ?self.config.namespace,
            "router created"
        );

        Ok(Router {
            config: self.config,
            dispatcher,
            entry,
            relay,
        })
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
