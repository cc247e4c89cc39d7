//! Router configuration.

/// Default prefix that marks an action as local-only.
pub const DEFAULT_ACTION_PREFIX: &str = "action_";

/// Settings shared by the URL entry point and component collection.
///
/// # Example
///
/// ```rust,ignore
/// let config = RouterConfig::default()
///     .with_action_prefix("local_")
///     .with_namespace("shop-app");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Prefix for local-only actions. URL requests already carrying it are dropped,
    /// and it is prepended to every other URL action.
    pub action_prefix: String,
    /// Restricts collected components to those submitted from this crate.
    ///
    /// `None` accepts every collected component.
    pub namespace: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            action_prefix: DEFAULT_ACTION_PREFIX.to_string(),
            namespace: None,
        }
    }
}

impl RouterConfig {
    /// Set the local-only action prefix.
    pub fn with_action_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.action_prefix = prefix.into();
        self
    }

    /// Set the component namespace.
    ///
    /// Crate names may contain `-`, but the compiler reports them with `_`,
    /// so the namespace is normalised the same way.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(normalize_namespace(&namespace.into()));
        self
    }

    /// Check whether a component collected from `namespace` belongs to this router.
    pub fn accepts_namespace(&self, namespace: &str) -> bool {
        match &self.namespace {
            Some(own) => *own == normalize_namespace(namespace),
            None => true,
        }
    }
}

fn normalize_namespace(namespace: &str) -> String {
    namespace.replace('-', "_")
}
