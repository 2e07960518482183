use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use crate::crate_path::core_path;

pub fn expand(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match generate(&input) {
        Ok(output) => output.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed information about a single field.
struct FieldMeta {
    /// Wire name after rename resolution.
    wire_name: String,
    ty: syn::Type,
    /// `#[serde(skip_serializing_if = "...")]` or `#[serde(default)]` — the
    /// omit-if-empty marker; such fields stay in the schema but are not
    /// required.
    omit: bool,
    /// `#[serde(skip)]` — excluded from schema, example, and validation.
    skipped: bool,
}

fn generate(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(ApiSchema)] only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(ApiSchema)] only supports structs with named fields",
            ))
        }
    };

    let core = core_path();
    let name = &input.ident;
    let name_str = name.to_string();

    let mut descriptors: Vec<TokenStream2> = Vec::new();
    for field in fields {
        let meta = parse_field(field)?;
        if meta.skipped {
            continue;
        }
        let wire_name = &meta.wire_name;
        let ty = &meta.ty;
        let omit = meta.omit;
        descriptors.push(quote! {
            #core::FieldDescriptor {
                name: #wire_name.to_string(),
                kind: <#ty as #core::ApiSchema>::field_kind(),
                required: !<#ty as #core::ApiSchema>::is_nullable() && !#omit,
                nullable: <#ty as #core::ApiSchema>::is_nullable(),
            }
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #core::ApiSchema for #name #ty_generics #where_clause {
            fn schema_name() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(#name_str)
            }

            fn field_kind() -> #core::FieldKind {
                #core::FieldKind::Reference(#core::TypeRef::new(
                    #name_str,
                    <#name #ty_generics as #core::ApiSchema>::shape,
                ))
            }

            fn shape() -> #core::TypeShape {
                #core::TypeShape::named(#name_str, ::std::vec![
                    #(#descriptors),*
                ])
            }
        }
    })
}

/// Read the wire name and markers from `#[serde(...)]` attributes, falling
/// back to the declared identifier with its first character lowercased.
fn parse_field(field: &syn::Field) -> syn::Result<FieldMeta> {
    let ident = field
        .ident
        .as_ref()
        .expect("named fields checked by caller");

    let mut rename: Option<String> = None;
    let mut skipped = false;
    let mut omit = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                // Only the plain `rename = "..."` form carries a single wire
                // name; the split serialize/deserialize form is left to the
                // identifier fallback.
                if meta.input.peek(syn::Token![=]) {
                    let value = meta.value()?;
                    let lit: syn::LitStr = value.parse()?;
                    rename = Some(lit.value());
                } else {
                    skip_nested(&meta)?;
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                skipped = true;
            } else if meta.path.is_ident("skip_serializing_if") {
                let value = meta.value()?;
                let _: syn::LitStr = value.parse()?;
                omit = true;
            } else if meta.path.is_ident("default") {
                if meta.input.peek(syn::Token![=]) {
                    let value = meta.value()?;
                    let _: syn::LitStr = value.parse()?;
                }
                omit = true;
            } else {
                // Every other serde attribute is serde's business; consume
                // its value so parsing can continue.
                skip_nested(&meta)?;
            }
            Ok(())
        })?;
    }

    Ok(FieldMeta {
        wire_name: rename.unwrap_or_else(|| default_wire_name(ident)),
        ty: field.ty.clone(),
        omit,
        skipped,
    })
}

/// Consume the value of an unrecognized nested meta entry, whether it is
/// `key = value` or `key(...)`.
fn skip_nested(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let value = meta.value()?;
        let _: syn::Expr = value.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream2 = content.parse()?;
    }
    Ok(())
}

/// Default wire name: the declared identifier with its first character
/// lowercased. A naming default, not a business rule; `#[serde(rename)]`
/// always wins.
fn default_wire_name(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
