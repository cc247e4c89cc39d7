//! Error types for modlink.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RouterError`] - Errors raised while resolving, dispatching or parsing
//! - [`RegistryError`] - Errors raised while registering component factories

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while routing a request to a component.
///
/// None of these are fatal: the router stays usable after any of them.
#[derive(Error, Debug)]
pub enum RouterError {
    /// No factory is registered under the requested component name.
    #[error("component not found: {0}")]
    ComponentNotFound(String),

    /// The resolved component has no action with the requested name.
    #[error("action `{action}` not found on component `{component}`")]
    ActionNotFound {
        /// Name the component was resolved under.
        component: String,
        /// Requested action name.
        action: String,
    },

    /// The inbound URL is missing a required part.
    #[error("malformed url `{url}`: {reason}")]
    MalformedUrl {
        /// The rejected URL.
        url: String,
        /// Which part was missing.
        reason: &'static str,
    },

    /// The calling thread is already executing the component and cannot re-enter it.
    #[error("component `{0}` is busy")]
    ComponentBusy(String),

    /// The action ran and returned an error.
    #[error("action `{action}` on component `{component}` failed")]
    Action {
        /// Name the component was resolved under.
        component: String,
        /// Action that failed.
        action: String,
        /// Error returned by the action.
        #[source]
        source: BoxError,
    },
}

impl RouterError {
    /// The text shown to the user for this error, if it is one the user hears about.
    ///
    /// `ComponentBusy` and `Action` are returned to the caller only.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            RouterError::ComponentNotFound(_) => Some("Undiscovered component!"),
            RouterError::ActionNotFound { .. } => Some("Undiscovered action!"),
            RouterError::MalformedUrl { .. } => Some("Malformed URL!"),
            RouterError::ComponentBusy(_) | RouterError::Action { .. } => None,
        }
    }
}

/// Errors that can occur while registering component factories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A factory is already registered under this name.
    #[error("component already registered: {0}")]
    DuplicateComponent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            RouterError::ComponentNotFound("A".into()).user_message(),
            Some("Undiscovered component!")
        );
        assert_eq!(
            RouterError::ActionNotFound {
                component: "A".into(),
                action: "action_x".into(),
            }
            .user_message(),
            Some("Undiscovered action!")
        );
        assert_eq!(RouterError::ComponentBusy("A".into()).user_message(), None);
    }

    #[test]
    fn test_display() {
        let err = RouterError::MalformedUrl {
            url: "nope".into(),
            reason: "missing scheme",
        };
        assert_eq!(err.to_string(), "malformed url `nope`: missing scheme");
    }
}
