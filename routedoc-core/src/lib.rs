//! Core engine for routedoc: runtime type description, schema walking, and
//! structural validation.
//!
//! Application types opt in with `#[derive(ApiSchema)]`; the walker derives a
//! [`TypeShape`] from the type, and the same descriptor feeds three
//! artifacts that must agree on naming, optionality, and types:
//!
//! - the JSON Schema emitted by `routedoc-openapi`,
//! - the generated example payload,
//! - the structural validator in [`validation`].

// Lets the derive macro refer to `::routedoc_core` from inside this crate
// and its integration tests.
extern crate self as routedoc_core;

pub mod meta;
pub mod shape;
pub mod validation;
pub mod walker;

pub use meta::{Endpoint, EndpointRegistry, ParamLocation, Parameter, SchemaHandle};
pub use shape::{ApiSchema, FieldDescriptor, FieldKind, FloatWidth, IntWidth, TypeRef, TypeShape};
pub use validation::{ErrorKind, ValidationError, ValidationErrorResponse};
pub use walker::{walk, WalkOutput};

/// Derives [`ApiSchema`] for a struct with named fields.
///
/// Wire names, skips, and omit markers are read from `#[serde(...)]` field
/// attributes, so the description always matches what `serde_json` actually
/// serializes.
pub use routedoc_macros::ApiSchema;

/// Commonly used items.
pub mod prelude {
    pub use crate::meta::{Endpoint, EndpointRegistry, ParamLocation, Parameter, SchemaHandle};
    pub use crate::shape::{FieldDescriptor, FieldKind, TypeShape};
    pub use crate::validation::{
        validate_body, validate_parameters, ErrorKind, ValidationError, ValidationErrorResponse,
    };
    pub use crate::walker::{walk, WalkOutput};
    // Trait and derive macro share the name; this pulls in both.
    pub use crate::ApiSchema;
}
