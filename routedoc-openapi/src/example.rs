//! Example payload generation.
//!
//! Examples are synthesized per field from ordered heuristic tables matched
//! case-insensitively as substrings of the wire field name; the declared
//! kind picks the table, so the same name pattern yields different literal
//! types for string-typed and integer-typed fields.

use chrono::Utc;
use serde_json::{json, Map, Value};

use routedoc_core::shape::{FieldKind, TypeShape};
use routedoc_core::walker::WalkOutput;

/// Generate an example payload for a walked type.
///
/// Array usage sites produce a single-element list. The output is always
/// valid for JSON encoding and always validates clean against its own shape.
pub fn generate_example(output: &WalkOutput) -> Value {
    let element = match &output.kind {
        FieldKind::Array(elem) => elem.as_ref(),
        other => other,
    };

    let mut stack = Vec::new();
    if let Some(name) = output.shape.name() {
        stack.push(name);
    }

    let base = match element {
        FieldKind::Reference(_) | FieldKind::Object(_) => fields_example(&output.shape, &mut stack),
        other => kind_example(other, "", &mut stack),
    };

    if output.is_array {
        json!([base])
    } else {
        base
    }
}

/// Example object for a shape. Nested structs are inlined with generated
/// sub-fields; this is example data, never a `$ref`.
pub fn shape_example(shape: &TypeShape) -> Value {
    let mut stack = Vec::new();
    if let Some(name) = shape.name() {
        stack.push(name);
    }
    fields_example(shape, &mut stack)
}

fn fields_example(shape: &TypeShape, stack: &mut Vec<&'static str>) -> Value {
    let mut map = Map::new();
    for field in shape.fields() {
        map.insert(
            field.name.clone(),
            kind_example(&field.kind, &field.name, stack),
        );
    }
    Value::Object(map)
}

fn kind_example(kind: &FieldKind, wire_name: &str, stack: &mut Vec<&'static str>) -> Value {
    let name = wire_name.to_lowercase();
    match kind {
        FieldKind::String => json!(string_example(&name)),
        FieldKind::Int(_) => json!(int_example(&name)),
        FieldKind::Uint(_) => json!(uint_example(&name)),
        FieldKind::Float(_) => json!(float_example(&name)),
        FieldKind::Bool => json!(bool_example(&name)),
        // Current time rather than a fixed literal; tests normalize this.
        FieldKind::DateTime => json!(Utc::now().to_rfc3339()),
        FieldKind::Array(elem) => json!([kind_example(elem, wire_name, stack)]),
        FieldKind::Object(fields) => {
            let mut map = Map::new();
            for field in fields {
                map.insert(
                    field.name.clone(),
                    kind_example(&field.kind, &field.name, stack),
                );
            }
            Value::Object(map)
        }
        FieldKind::Reference(type_ref) => {
            // Cut cycles: a self-referential field yields null, which is
            // only reachable through a nullable link in any finite payload.
            if stack.contains(&type_ref.name()) {
                return Value::Null;
            }
            stack.push(type_ref.name());
            let value = fields_example(&type_ref.resolve(), stack);
            stack.pop();
            value
        }
        FieldKind::Unknown => Value::Null,
    }
}

// ── Heuristic tables (first match wins) ────────────────────

fn string_example(name: &str) -> &'static str {
    const PATTERNS: &[(&str, &str)] = &[
        ("email", "user@example.com"),
        ("password", "securePassword123"),
        ("username", "john_doe"),
        ("user_name", "john_doe"),
        ("firstname", "John"),
        ("first_name", "John"),
        ("lastname", "Doe"),
        ("last_name", "Doe"),
        ("name", "John Doe"),
        ("phone", "+1-555-0123"),
        ("address", "123 Main Street, City, Country"),
        ("url", "https://example.com"),
        ("link", "https://example.com"),
        ("id", "12345"),
        ("token", "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."),
        ("description", "This is a sample description"),
        ("title", "Sample Title"),
        ("status", "active"),
        ("type", "default"),
    ];

    for (pattern, example) in PATTERNS {
        if name.contains(pattern) {
            return example;
        }
    }
    "example_value"
}

fn int_example(name: &str) -> i64 {
    const PATTERNS: &[(&str, i64)] = &[
        ("age", 25),
        ("count", 10),
        ("total", 10),
        ("id", 12345),
        ("port", 8080),
        ("year", 2024),
        ("month", 6),
        ("day", 15),
    ];

    for (pattern, example) in PATTERNS {
        if name.contains(pattern) {
            return *example;
        }
    }
    1
}

fn uint_example(name: &str) -> u64 {
    int_example(name).max(0) as u64
}

fn float_example(name: &str) -> f64 {
    const PATTERNS: &[(&str, f64)] = &[
        ("price", 99.99),
        ("cost", 99.99),
        ("rate", 0.15),
        ("percentage", 75.5),
        ("latitude", 40.7128),
        ("longitude", -74.0060),
        ("weight", 70.5),
        ("height", 175.0),
    ];

    for (pattern, example) in PATTERNS {
        if name.contains(pattern) {
            return *example;
        }
    }
    1.0
}

fn bool_example(name: &str) -> bool {
    const PATTERNS: &[(&str, bool)] = &[
        ("active", true),
        ("enabled", true),
        ("deleted", false),
        ("disabled", false),
        ("verified", true),
        ("confirmed", true),
    ];

    for (pattern, example) in PATTERNS {
        if name.contains(pattern) {
            return *example;
        }
    }
    false
}
