//! Distributed component registration via `inventory`.
//!
//! Components submit themselves from anywhere in the program with
//! [`register_component!`](crate::register_component); a router built with
//! `collect_components()` picks them all up at start.
//!
//! ```rust,ignore
//! #[derive(Default)]
//! struct Profile;
//! impl Component for Profile { ... }
//!
//! modlink::register_component!(Profile);
//! modlink::register_component!(Profile, "UserProfile");
//! ```

use crate::{config::RouterConfig, registry::RegistryBuilder};
use modlink_core::ComponentFn;

/// A component factory submitted to the global collection.
pub struct CollectedComponent {
    /// Crate the registration came from (`CARGO_CRATE_NAME`).
    pub namespace: &'static str,
    /// Component name.
    pub name: &'static str,
    /// Zero-argument factory.
    pub factory: ComponentFn,
}

impl CollectedComponent {
    /// Create a new collected component entry.
    pub const fn new(namespace: &'static str, name: &'static str, factory: ComponentFn) -> Self {
        Self {
            namespace,
            name,
            factory,
        }
    }
}

inventory::collect!(CollectedComponent);

/// Iterate over every submitted component accepted by `config`'s namespace.
pub fn collected<'a>(
    config: &'a RouterConfig,
) -> impl Iterator<Item = &'static CollectedComponent> + 'a {
    inventory::iter::<CollectedComponent>
        .into_iter()
        .filter(move |entry| config.accepts_namespace(entry.namespace))
}

impl RegistryBuilder {
    /// Register every collected component accepted by `config`'s namespace.
    pub fn register_collected(mut self, config: &RouterConfig) -> Self {
        for entry in collected(config) {
            self.register_fn_mut(entry.name, entry.factory);
        }
        self
    }
}

/// Submit a component to the global collection.
///
/// The component must implement `Component + Default`. The name defaults to
/// the type's name as written.
#[macro_export]
macro_rules! register_component {
    ($ty:ty) => {
        $crate::register_component!($ty, stringify!($ty));
    };
    ($ty:ty, $name:expr) => {
        $crate::inventory::submit! {
            $crate::collected::CollectedComponent::new(
                env!("CARGO_CRATE_NAME"),
                $name,
                $crate::construct::<$ty>,
            )
        }
    };
}
