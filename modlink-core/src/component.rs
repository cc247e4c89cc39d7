//! # Components
//!
//! A component is an independently addressable module that the router looks
//! up by name. Components describe their callable surface with an
//! [`ActionTable`]; the router talks to them through the object-safe
//! [`DynComponent`] view.
//!
//! # Usage Patterns
//!
//! 1. **Manual**: `impl Component for MyComponent { fn actions() -> ... }`
//! 2. **Macro**: `#[modlink::actions] impl MyComponent { #[action] fn ... }`

use crate::{action::ActionTable, error::BoxError, params::Params, response::Response};
use std::{any::Any, sync::Arc};

/// An addressable module with a table of named actions.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a modlink Component",
    label = "missing `Component` implementation",
    note = "Implement `Component::actions` or annotate the impl block with `#[modlink::actions]`."
)]
pub trait Component: Send + 'static {
    /// Build the table of actions this component responds to.
    ///
    /// Called once when the component type is registered; the table is shared
    /// by every instance created from that registration.
    fn actions() -> ActionTable<Self>
    where
        Self: Sized;
}

/// Object-safe view of a component instance.
pub trait DynComponent: Any + Send {
    /// Name of the concrete type, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Check if the component has an action with this name.
    fn responds_to(&self, action: &str) -> bool;

    /// Invoke an action.
    ///
    /// Returns `None` when the component has no such action.
    fn perform(&mut self, action: &str, params: &Params) -> Option<Result<Response, BoxError>>;

    /// Names of all actions, sorted.
    fn action_names(&self) -> Vec<&str>;

    /// The concrete component, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The concrete component, for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn DynComponent + 'a {
    /// Borrow the concrete component as `C`.
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        self.as_any().downcast_ref()
    }

    /// Mutably borrow the concrete component as `C`.
    pub fn downcast_mut<C: Any>(&mut self) -> Option<&mut C> {
        self.as_any_mut().downcast_mut()
    }

    /// Check if the concrete component is a `C`.
    pub fn is<C: Any>(&self) -> bool {
        self.as_any().is::<C>()
    }
}

/// A component paired with its shared action table.
pub struct Instance<C> {
    component: C,
    actions: Arc<ActionTable<C>>,
}

impl<C: Component> Instance<C> {
    /// Pair a component with an already built table.
    pub fn new(component: C, actions: Arc<ActionTable<C>>) -> Self {
        Self { component, actions }
    }

    /// Pair a component with a freshly built table.
    pub fn with_own_table(component: C) -> Self {
        Self::new(component, Arc::new(C::actions()))
    }

    /// Get the wrapped component.
    pub fn component(&self) -> &C {
        &self.component
    }

    /// Unwrap the component.
    pub fn into_inner(self) -> C {
        self.component
    }
}

impl<C: Component> DynComponent for Instance<C> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<C>()
    }

    fn responds_to(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    fn perform(&mut self, action: &str, params: &Params) -> Option<Result<Response, BoxError>> {
        let handler = self.actions.get(action)?;
        Some(handler(&mut self.component, params))
    }

    fn action_names(&self) -> Vec<&str> {
        self.actions.names()
    }

    fn as_any(&self) -> &dyn Any {
        &self.component
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.component
    }
}

/// A zero-argument component factory as a plain function pointer.
///
/// Usable in `static` tables and `inventory` submissions.
pub type ComponentFn = fn() -> Box<dyn DynComponent>;

/// Construct a default `C` with its own action table.
///
/// `construct::<C>` coerces to [`ComponentFn`].
pub fn construct<C: Component + Default>() -> Box<dyn DynComponent> {
    Box::new(Instance::with_own_table(C::default()))
}
