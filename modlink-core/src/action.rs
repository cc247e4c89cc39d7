//! Action tables: the callable surface of a component.

use crate::{
    error::BoxError,
    params::Params,
    response::{IntoResponse, Response},
};
use std::{collections::HashMap, fmt, sync::Arc};

/// A bound action handler for component type `C`.
pub type Action<C> = Arc<dyn Fn(&mut C, &Params) -> Result<Response, BoxError> + Send + Sync>;

/// A mapping from action names to handlers.
///
/// "Does the component respond to this action" is a key lookup, and
/// invocation is a direct call.
///
/// # Example
///
/// ```rust,ignore
/// impl Component for Profile {
///     fn actions() -> ActionTable<Self> {
///         ActionTable::new()
///             .action("action_show", |this: &mut Self, params: &Params| this.show(params))
///             .action("action_reset", |this: &mut Self, _: &Params| this.reset())
///     }
/// }
/// ```
pub struct ActionTable<C> {
    actions: HashMap<String, Action<C>>,
}

impl<C> ActionTable<C> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Add an action (builder-style). A later action with the same name replaces the earlier one.
    pub fn action<F, R>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        C: 'static,
        F: Fn(&mut C, &Params) -> R + Send + Sync + 'static,
        R: IntoResponse,
    {
        self.insert(name, handler);
        self
    }

    /// Add an action (mutable version).
    pub fn insert<F, R>(&mut self, name: impl Into<String>, handler: F)
    where
        C: 'static,
        F: Fn(&mut C, &Params) -> R + Send + Sync + 'static,
        R: IntoResponse,
    {
        let action: Action<C> = Arc::new(move |component: &mut C, params: &Params| {
            handler(component, params).into_response()
        });
        self.actions.insert(name.into(), action);
    }

    /// Look up an action.
    pub fn get(&self, name: &str) -> Option<&Action<C>> {
        self.actions.get(name)
    }

    /// Check if an action exists.
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the table has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<C> Default for ActionTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ActionTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("actions", &self.names())
            .finish()
    }
}
