//! OpenAPI 3.1 generation for routedoc.
//!
//! Turns walked type shapes and registered endpoints into a complete
//! OpenAPI document: component schemas, example payloads, and the spec
//! envelope itself.

pub mod builder;
pub mod example;
pub mod schema;

pub use builder::{build_spec, OpenApiConfig};
pub use example::{generate_example, shape_example};
pub use schema::{emit_schema, shape_schema, SchemaRegistry};
