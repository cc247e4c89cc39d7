//! # modlink-core
//!
//! Core traits for the modlink inter-module router.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! components that only need to describe themselves to a router, without
//! pulling in the `modlink-std` implementations.
//!
//! # Building Blocks
//!
//! ## Components ([`Component`])
//!
//! An independently addressable module. A component exposes its callable
//! surface as an [`ActionTable`]: a map from action names to bound handler
//! functions. The router never inspects the concrete type; it only asks the
//! table whether an action exists and calls it.
//!
//! ## Type Erasure ([`DynComponent`])
//!
//! Registries store components as `Box<dyn DynComponent>`. The erased view
//! answers `responds_to` and `perform`, and can be downcast back to the
//! concrete type when a caller needs direct access.
//!
//! ## Parameters and Responses ([`Params`], [`IntoResponse`])
//!
//! Actions receive a flat string bag and may return anything convertible to a
//! [`Response`].
//!
//! ## Collaborators ([`NotificationBus`], [`UserNotifier`])
//!
//! The two external capabilities a router relies on: a named-channel broadcast
//! bus and a way of telling the user that something could not be found.
//!
//! # Error Types
//!
//! - [`RouterError`] - Errors raised while routing a request
//! - [`RegistryError`] - Errors raised while registering components

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod bus;
mod component;
mod error;
mod message;
mod notifier;
mod params;
mod response;

// Re-exports
pub use action::{Action, ActionTable};
pub use bus::{Notification, NotificationBus, ObserverFn, ObserverId, Payload};
pub use component::{Component, ComponentFn, DynComponent, Instance, construct};
pub use error::{BoxError, RegistryError, RouterError};
pub use message::Message;
pub use notifier::UserNotifier;
pub use params::Params;
pub use response::{IntoResponse, Response};
