//! # Action Dispatcher
//!
//! Resolves a component through the [`ModuleRegistry`] and runs a named
//! action on it.
//!
//! # Flow
//!
//! 1. Resolve the component (a failure has already been reported to the user).
//! 2. Hand the instance to the optional `on_resolved` callback.
//! 3. If an action was named, look it up in the component's action table and
//!    call it with the parameters.
//!
//! A missing action is reported to the user and the component is released,
//! so the next request for that name starts from a fresh instance.

use crate::registry::ModuleRegistry;
use modlink_core::{DynComponent, Params, Response, RouterError};
use std::sync::Arc;

/// The outcome of a successful dispatch.
#[derive(Debug)]
pub struct Dispatched {
    /// Name the component was resolved under.
    pub component: String,
    /// The action that ran, if one was requested.
    pub action: Option<String>,
    /// What the action returned. `Empty` when no action ran.
    pub response: Response,
}

/// Dispatches named actions onto registry components.
#[derive(Clone)]
pub struct ActionDispatcher {
    registry: Arc<ModuleRegistry>,
}

impl ActionDispatcher {
    /// Create a dispatcher over `registry`.
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    /// Get the registry this dispatcher resolves through.
    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    /// Resolve `name` and run `action` on it.
    ///
    /// `None` or an empty action name only resolves the component.
    pub fn dispatch(
        &self,
        name: &str,
        action: Option<&str>,
        params: &Params,
    ) -> Result<Dispatched, RouterError> {
        self.dispatch_with(name, action, params, |_| {})
    }

    /// Like [`dispatch`](Self::dispatch), calling `on_resolved` with the
    /// instance before the action runs.
    pub fn dispatch_with<F>(
        &self,
        name: &str,
        action: Option<&str>,
        params: &Params,
        on_resolved: F,
    ) -> Result<Dispatched, RouterError>
    where
        F: FnOnce(&mut dyn DynComponent),
    {
        let handle = self.registry.resolve(name)?;
        let action = action.filter(|a| !a.is_empty());

        let outcome = handle.with(|component| {
            on_resolved(&mut *component);
            action.map(|a| component.perform(a, params))
        })?;

        let Some(action) = action else {
            return Ok(Dispatched {
                component: name.to_string(),
                action: None,
                response: Response::Empty,
            });
        };

        match outcome.flatten() {
            Some(Ok(response)) => {
                #[cfg(feature = "tracing")]
                {
                    if !response.is_empty() {
                        tracing::info!(component = %name, action = %action, "action executed");
                    }
                }
                Ok(Dispatched {
                    component: name.to_string(),
                    action: Some(action.to_string()),
                    response,
                })
            }
            Some(Err(source)) => Err(RouterError::Action {
                component: name.to_string(),
                action: action.to_string(),
                source,
            }),
            None => {
                let err = RouterError::ActionNotFound {
                    component: name.to_string(),
                    action: action.to_string(),
                };
                self.registry.report(&err);
                self.registry.release(name);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}
