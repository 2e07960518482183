//! Schema emission: [`TypeShape`] trees to JSON-Schema-shaped documents.
//!
//! The [`SchemaRegistry`] collects named component schemas for the duration
//! of one generation pass; it is rebuilt on every call and never persisted.

use serde_json::{json, Map, Value};

use routedoc_core::shape::{FieldDescriptor, FieldKind, FloatWidth, IntWidth, TypeShape};
use routedoc_core::walker::WalkOutput;

/// Registry that collects JSON Schema definitions for OpenAPI components.
///
/// Built once per generation pass and merged into the spec's
/// `components/schemas`. Registration is first-wins: a later shape under an
/// already-registered name is silently ignored.
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: Map<String, Value>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: Map::new(),
        }
    }

    /// Register a schema definition under the given name. The first
    /// registration wins; conflicting later shapes are ignored.
    pub fn register(&mut self, name: &str, schema: Value) {
        if !self.schemas.contains_key(name) {
            self.schemas.insert(name.to_string(), schema);
        }
    }

    /// Check if a schema is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Consume the registry and return the schemas map for embedding in the
    /// spec's components section.
    pub fn into_schemas(self) -> Map<String, Value> {
        self.schemas
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit the inline schema for a walked type, registering it and every
/// transitively reachable named shape as components.
///
/// Array usage sites wrap the element schema in `{type: "array", items}`.
/// The emitter never fails; unsupported kinds degrade to an empty node.
pub fn emit_schema(output: &WalkOutput, registry: &mut SchemaRegistry) -> Value {
    for component in &output.components {
        if let Some(name) = component.name() {
            let schema = shape_schema(component);
            registry.register(name, schema);
        }
    }

    let element = match &output.kind {
        FieldKind::Array(elem) => elem.as_ref(),
        other => other,
    };

    let base = match element {
        FieldKind::Reference(_) | FieldKind::Object(_) => {
            if let Some(name) = output.shape.name() {
                registry.register(name, shape_schema(&output.shape));
            }
            shape_schema(&output.shape)
        }
        other => kind_schema(other, false),
    };

    if output.is_array {
        json!({ "type": "array", "items": base })
    } else {
        base
    }
}

/// Object schema for a shape: properties plus the required-field list.
/// The `required` array is omitted entirely when no field is required.
pub fn shape_schema(shape: &TypeShape) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in shape.fields() {
        properties.insert(field.name.clone(), field_schema(field));
        if field.required {
            required.push(json!(field.name));
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    if let Some(name) = shape.name() {
        schema.insert("title".to_string(), json!(name));
    }
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }

    Value::Object(schema)
}

fn field_schema(field: &FieldDescriptor) -> Value {
    kind_schema(&field.kind, field.nullable)
}

fn kind_schema(kind: &FieldKind, nullable: bool) -> Value {
    let mut schema = match kind {
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::DateTime => json!({ "type": "string", "format": "date-time" }),
        FieldKind::Int(IntWidth::W32) => json!({ "type": "integer", "format": "int32" }),
        FieldKind::Int(IntWidth::W64) => json!({ "type": "integer", "format": "int64" }),
        FieldKind::Uint(IntWidth::W32) => {
            json!({ "type": "integer", "format": "int32", "minimum": 0 })
        }
        FieldKind::Uint(IntWidth::W64) => {
            json!({ "type": "integer", "format": "int64", "minimum": 0 })
        }
        FieldKind::Float(FloatWidth::Single) => json!({ "type": "number", "format": "float" }),
        FieldKind::Float(FloatWidth::Double) => json!({ "type": "number", "format": "double" }),
        FieldKind::Bool => json!({ "type": "boolean" }),
        FieldKind::Array(elem) => json!({ "type": "array", "items": kind_schema(elem, false) }),
        FieldKind::Object(fields) => shape_schema(&TypeShape::anonymous(fields.clone())),
        FieldKind::Reference(type_ref) => {
            json!({ "$ref": format!("#/components/schemas/{}", type_ref.name()) })
        }
        // Empty schema rather than an error; worst case is an
        // uninformative fragment.
        FieldKind::Unknown => json!({}),
    };

    if nullable {
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("nullable".to_string(), json!(true));
        }
    }

    schema
}
