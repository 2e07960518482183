//! Routedoc — schema inference, request validation, and OpenAPI 3.1
//! generation for JSON APIs.
//!
//! This facade crate re-exports the routedoc sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use routedoc::prelude::*;
//! ```
//!
//! Derive [`ApiSchema`] on your request and response structs, describe your
//! endpoints with [`Endpoint`], and [`build_spec`] produces the OpenAPI
//! document while [`validate_body`] and [`validate_parameters`] check
//! incoming traffic against the same shapes.

// Lets the derive macro refer to `::routedoc` from inside this crate and
// its integration tests.
extern crate self as routedoc;

// Re-export sub-crates as public modules so they're accessible as
// `routedoc::routedoc_core`, etc.
//
// The derive macro uses `proc-macro-crate` to detect whether the user
// depends on `routedoc` (facade) or `routedoc-core` directly, and generates
// the correct paths.
pub extern crate routedoc_core;
pub extern crate routedoc_macros;
pub extern crate routedoc_openapi;

pub use routedoc_core::meta::{Endpoint, EndpointRegistry, Parameter, ParamLocation, SchemaHandle};
pub use routedoc_core::shape::{
    FieldDescriptor, FieldKind, FloatWidth, IntWidth, TypeRef, TypeShape,
};
// Trait and derive macro share the name; this pulls in both.
pub use routedoc_core::ApiSchema;
pub use routedoc_core::validation::{
    coerce_parameter, validate_body, validate_parameters, ErrorKind, ParamValue, ValidationError,
    ValidationErrorResponse,
};
pub use routedoc_core::walker::{walk, WalkOutput};
pub use routedoc_openapi::{
    build_spec, emit_schema, generate_example, shape_example, shape_schema, OpenApiConfig,
    SchemaRegistry,
};

pub mod prelude {
    pub use routedoc_core::prelude::*;
    pub use routedoc_openapi::{build_spec, OpenApiConfig};
}
