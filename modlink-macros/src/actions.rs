//! Expansion of `#[actions]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, LitStr};

/// One `#[action]` method found in the impl block.
struct ActionMethod {
    name: LitStr,
    method: syn::Ident,
    takes_params: bool,
}

/// Strip the `#[action]` attributes from `input` and append a `Component` impl.
pub(crate) fn expand(mut input: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[actions] must be placed on an inherent impl block",
        ));
    }

    let mut methods = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(function) = item {
            if let Some(action) = take_action(function)? {
                methods.push(action);
            }
        }
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    let entries = methods.iter().map(|action| {
        let name = &action.name;
        let method = &action.method;
        if action.takes_params {
            quote! {
                .action(#name, |this: &mut Self, params: &::modlink::Params| this.#method(params))
            }
        } else {
            quote! {
                .action(#name, |this: &mut Self, _: &::modlink::Params| this.#method())
            }
        }
    });

    Ok(quote! {
        #input

        impl #impl_generics ::modlink::Component for #self_ty #where_clause {
            fn actions() -> ::modlink::ActionTable<Self> {
                ::modlink::ActionTable::new()
                    #(#entries)*
            }
        }
    })
}

/// Remove the `#[action]` attribute from `function`, if present, and describe it.
fn take_action(function: &mut ImplItemFn) -> syn::Result<Option<ActionMethod>> {
    let Some(index) = function
        .attrs
        .iter()
        .position(|attr| attr.path().is_ident("action"))
    else {
        return Ok(None);
    };
    let attr = function.attrs.remove(index);

    let method = function.sig.ident.clone();
    let mut name = LitStr::new(&method.to_string(), method.span());
    if !matches!(attr.meta, syn::Meta::Path(_)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = meta.value()?.parse()?;
                Ok(())
            } else {
                Err(meta.error("unknown attribute, expected `name`"))
            }
        })?;
    }

    let sig = &function.sig;
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            sig.asyncness,
            "action methods must not be async",
        ));
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                sig,
                "action methods must take `&self` or `&mut self`",
            ));
        }
    }

    let takes_params = match (inputs.next(), inputs.next()) {
        (None, _) => false,
        (Some(FnArg::Typed(_)), None) => true,
        (Some(extra), _) => {
            return Err(syn::Error::new_spanned(
                extra,
                "action methods take at most one argument: `&Params`",
            ));
        }
    };

    Ok(Some(ActionMethod {
        name,
        method,
        takes_params,
    }))
}
