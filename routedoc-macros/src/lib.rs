extern crate proc_macro;
use proc_macro::TokenStream;

pub(crate) mod api_schema;
pub(crate) mod crate_path;

/// Derive macro implementing `ApiSchema` for a struct with named fields.
///
/// The generated impl describes the struct's wire shape: one
/// `FieldDescriptor` per field, classified by the field type's own
/// `ApiSchema` impl. Nested named structs become lazy references, so
/// self-referential types are fine.
///
/// # Recognized `#[serde(...)]` field attributes
///
/// | Attribute | Effect |
/// |-----------|--------|
/// | `rename = "x"` | Wire name becomes `x` |
/// | `skip` / `skip_serializing` | Field excluded from schema, example, and validation |
/// | `skip_serializing_if = "..."` | Field stays in the schema but is not required |
/// | `default` | Same as `skip_serializing_if` for requiredness |
///
/// Without a rename, the wire name is the field identifier with its first
/// character lowercased. `Option<T>` fields are nullable and never required.
///
/// # Example
///
/// ```ignore
/// use routedoc_core::ApiSchema;
///
/// #[derive(ApiSchema)]
/// struct User {
///     name: String,
///     email: String,
///     #[serde(rename = "user_age")]
///     age: u32,
///     nickname: Option<String>,
/// }
/// ```
#[proc_macro_derive(ApiSchema)]
pub fn derive_api_schema(input: TokenStream) -> TokenStream {
    api_schema::expand(input)
}
