//! # modlink-std
//!
//! Standard implementations for the modlink inter-module router.
//!
//! This crate provides:
//! - **Module registry**: [`ModuleRegistry`], [`RegistryBuilder`], [`ComponentHandle`]
//! - **Dispatch**: [`ActionDispatcher`]
//! - **URL entry point**: [`UrlEntry`], [`ParsedUrl`]
//! - **Messaging**: [`MessagingRelay`] over a [`LocalBus`]
//! - **Notifiers**: [`TracingNotifier`], [`SilentNotifier`]
//! - **Distributed registration**: `register_component!` (feature `inventory`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use modlink_core;

// Modules
pub mod bus;
#[cfg(feature = "inventory")]
pub mod collected;
pub mod config;
pub mod dispatch;
pub mod notifiers;
pub mod registry;
pub mod relay;
pub mod testing;
pub mod url;

#[cfg(feature = "inventory")]
pub use inventory;
pub use modlink_core::construct;

pub use bus::LocalBus;
pub use config::{DEFAULT_ACTION_PREFIX, RouterConfig};
pub use dispatch::{ActionDispatcher, Dispatched};
pub use notifiers::{SilentNotifier, TracingNotifier};
pub use registry::{ComponentHandle, Factory, ModuleRegistry, RegistryBuilder};
pub use relay::{InformationHandler, MessagingRelay};
pub use url::{ParsedUrl, RouteRequest, Routed, UrlEntry};
