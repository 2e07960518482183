//! Crate path resolution for generated code.
//!
//! Detects whether the user depends on `routedoc` (facade) or
//! `routedoc-core` directly, and returns the appropriate path prefix for
//! generated code.

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::quote;

/// Returns the token stream for accessing `routedoc_core` types.
///
/// If the user depends on `routedoc`, returns `::routedoc`.
/// Otherwise returns `::routedoc_core` — which also resolves inside
/// `routedoc-core` itself and its integration tests thanks to the crate's
/// `extern crate self as routedoc_core` alias.
pub fn core_path() -> TokenStream {
    if let Ok(found) = crate_name("routedoc") {
        match found {
            FoundCrate::Itself => quote!(::routedoc),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else if let Ok(found) = crate_name("routedoc-core") {
        match found {
            FoundCrate::Itself => quote!(::routedoc_core),
            FoundCrate::Name(name) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
        }
    } else {
        // Fallback - assume routedoc_core is available (for error messages)
        quote!(::routedoc_core)
    }
}
