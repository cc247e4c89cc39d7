//! # modlink - Inter-Module Router
//!
//! `modlink` lets independently built components talk to each other without
//! compile-time references. A component is addressed by a string name and
//! exposes named actions; the router resolves the name to a live instance
//! (creating it on first use), runs the action with string parameters, and
//! hands back the result.
//!
//! Three entry paths share one registry:
//!
//! - **Local calls**: [`Router::open_module`] may run any action.
//! - **Inbound URLs**: [`Router::perform_action`] parses
//!   `scheme://Component/action?k=v` and refuses local-only actions.
//! - **Channels**: [`Router::send_information`] / [`Router::receive_information`]
//!   carry payloads between components by tag.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modlink::prelude::*;
//!
//! #[derive(Default)]
//! struct Profile { views: u32 }
//!
//! #[modlink::actions]
//! impl Profile {
//!     #[action]
//!     fn action_show(&mut self, params: &Params) -> Option<String> {
//!         self.views += 1;
//!         params.get("id").map(str::to_owned)
//!     }
//! }
//!
//! let router = Router::builder().register::<Profile>("Profile").build()?;
//! router.perform_action("shop://Profile/show?id=7")?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod router;

pub use router::{Router, RouterBuilder};

pub use modlink_core::{
    // Actions
    Action,
    ActionTable,
    // Errors
    BoxError,
    // Components
    Component,
    ComponentFn,
    DynComponent,
    Instance,
    // Response
    IntoResponse,
    // Messaging
    Message,
    Notification,
    NotificationBus,
    ObserverFn,
    ObserverId,
    // Parameters
    Params,
    Payload,
    RegistryError,
    Response,
    RouterError,
    // Notifier
    UserNotifier,
    construct,
};

pub use modlink_std::{
    ActionDispatcher, ComponentHandle, DEFAULT_ACTION_PREFIX, Dispatched, InformationHandler,
    LocalBus, MessagingRelay, ModuleRegistry, ParsedUrl, RegistryBuilder, RouteRequest, Routed,
    RouterConfig, SilentNotifier, TracingNotifier, UrlEntry,
};

/// Distributed component registration.
#[cfg(feature = "inventory")]
pub mod collected {
    pub use modlink_std::collected::{CollectedComponent, collected};
}

#[cfg(feature = "inventory")]
pub use modlink_std::register_component;

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use modlink_std::testing::*;
}

/// Prelude module - common imports for modlink.
///
/// # Usage
///
/// ```rust,ignore
/// use modlink::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ActionTable, BoxError, Component, DynComponent, IntoResponse, Message, Params, Payload,
        Response, Routed, Router, RouterError,
    };
}

#[cfg(feature = "macros")]
pub use modlink_macros::actions;

#[cfg(feature = "inventory")]
pub use inventory;
