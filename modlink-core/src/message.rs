//! Message trait for published payloads.

use std::any::Any;

/// A marker trait for values that can travel over a channel.
///
/// Messages must be `Any + Send + Sync` so that a subscriber on any thread can
/// downcast the payload back to its concrete type.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug)]
/// struct CartUpdated { items: usize }
///
/// relay.publish("cart", CartUpdated { items: 3 });
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Payloads published on a channel must be thread-safe and static."
)]
pub trait Message: Any + Send + Sync {}

impl<T: Any + Send + Sync> Message for T {}
