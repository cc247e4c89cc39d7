//! Procedural macros for modlink.
//!
//! - `#[actions]` - Implement `Component` from an impl block's `#[action]` methods

use proc_macro::TokenStream;
use syn::{ItemImpl, parse_macro_input};

mod actions;

/// Implement `modlink::Component` for a type from its `#[action]` methods.
///
/// Each method marked `#[action]` becomes an action named after the method.
/// Use `#[action(name = "...")]` to pick another name. An action method takes
/// `&self` or `&mut self` and, optionally, a `&Params` argument. Its return
/// type must implement `IntoResponse`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct Profile { views: u32 }
///
/// #[modlink::actions]
/// impl Profile {
///     #[action]
///     fn action_show(&mut self, params: &Params) -> Option<String> {
///         self.views += 1;
///         params.get("id").map(str::to_owned)
///     }
///
///     #[action(name = "action_views")]
///     fn views(&self) -> u32 {
///         self.views
///     }
///
///     // Not an action.
///     fn helper(&self) {}
/// }
/// ```
#[proc_macro_attribute]
pub fn actions(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[actions] takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemImpl);
    actions::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
