//! Structural validation of decoded JSON bodies and request parameters.
//!
//! Validators are pure functions over their inputs: they return the complete
//! error list for a payload in one pass and never panic on malformed caller
//! input. Turning a non-empty result into an HTTP response is the embedding
//! framework's concern.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::meta::{Parameter, SchemaHandle};
use crate::shape::{FieldDescriptor, FieldKind, TypeShape};

// ── Error types ────────────────────────────────────────────

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A mandatory field or parameter is absent (or JSON null).
    Required,
    /// A value is present but has the wrong primitive shape.
    TypeError,
    /// The input could not be decoded as JSON at all.
    ParseError,
}

/// A single field-level validation error.
///
/// `field` is a dotted/bracketed path: `.` for object nesting and `[i]` for
/// array indices, e.g. `users[1].age`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl ValidationError {
    fn required(field: String) -> Self {
        Self {
            message: format!("Required field '{field}' is missing"),
            field,
            kind: ErrorKind::Required,
        }
    }

    fn type_error(field: String, expected: &str) -> Self {
        Self {
            message: format!("Field '{field}' must be {expected}"),
            field,
            kind: ErrorKind::TypeError,
        }
    }
}

/// The serializable `400 Bad Request` body shape:
/// `{"error": "<summary>", "errors": [{"field","message","type"}, ...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    #[serde(rename = "error")]
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationError>,
}

impl ValidationErrorResponse {
    pub fn new(message: &str, errors: Vec<ValidationError>) -> Self {
        Self {
            message: message.to_string(),
            errors,
        }
    }
}

impl fmt::Display for ValidationErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationErrorResponse {}

// ── Structural body validation ─────────────────────────────

/// Validate a raw request body against an optional schema handle.
///
/// `None` means no validation was requested and always succeeds. A body that
/// fails to parse as JSON short-circuits with a single [`ErrorKind::
/// ParseError`]; otherwise every declared field is checked and the full
/// error list returned.
pub fn validate_body(raw: &str, schema: Option<&SchemaHandle>) -> Vec<ValidationError> {
    let Some(schema) = schema else {
        return Vec::new();
    };

    let body: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            return vec![ValidationError {
                field: "body".to_string(),
                message: err.to_string(),
                kind: ErrorKind::ParseError,
            }];
        }
    };

    let output = schema.walk();
    let mut errors = Vec::new();

    if output.is_array {
        match body.as_array() {
            Some(items) => {
                let elem = match &output.kind {
                    FieldKind::Array(elem) => elem.as_ref().clone(),
                    other => other.clone(),
                };
                for (i, item) in items.iter().enumerate() {
                    check_kind_inner(item, &elem, &format!("[{i}]"), &mut errors);
                }
            }
            None => errors.push(ValidationError::type_error("body".to_string(), "an array")),
        }
    } else {
        match &output.kind {
            FieldKind::Reference(_) | FieldKind::Object(_) => match body.as_object() {
                Some(map) => check_fields(map, output.shape.fields(), "", &mut errors),
                None => errors.push(ValidationError::type_error("body".to_string(), "an object")),
            },
            other => check_kind_inner(&body, other, "body", &mut errors),
        }
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "request body validation failed");
    }
    errors
}

/// Validate a decoded JSON value against a shape. The value is expected to
/// be an object matching the shape's field list.
pub fn validate_value(value: &Value, shape: &TypeShape) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    match value.as_object() {
        Some(map) => check_fields(map, shape.fields(), "", &mut errors),
        None => errors.push(ValidationError::type_error("body".to_string(), "an object")),
    }
    errors
}

fn check_fields(
    map: &Map<String, Value>,
    fields: &[FieldDescriptor],
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    for field in fields {
        let field_path = join_path(path, &field.name);
        let value = map.get(field.name.as_str());
        let missing = matches!(value, None | Some(Value::Null));

        if missing {
            // Absence and JSON null are equivalent; nullable/omitted fields
            // skip the type check entirely.
            if field.required {
                errors.push(ValidationError::required(field_path));
            }
            continue;
        }

        check_kind_inner(value.unwrap_or(&Value::Null), &field.kind, &field_path, errors);
    }
}

fn check_kind_inner(value: &Value, kind: &FieldKind, path: &str, errors: &mut Vec<ValidationError>) {
    match kind {
        FieldKind::String | FieldKind::DateTime => {
            if !value.is_string() {
                errors.push(ValidationError::type_error(path.to_string(), "a string"));
            }
        }
        FieldKind::Int(_) => match value.as_number() {
            Some(n) if is_integral(n) => {}
            Some(_) => errors.push(ValidationError::type_error(path.to_string(), "an integer")),
            None => errors.push(ValidationError::type_error(path.to_string(), "a number")),
        },
        FieldKind::Uint(_) => match value.as_number() {
            Some(n) if is_integral(n) && !is_negative(n) => {}
            Some(_) => errors.push(ValidationError::type_error(
                path.to_string(),
                "a non-negative integer",
            )),
            None => errors.push(ValidationError::type_error(path.to_string(), "a number")),
        },
        FieldKind::Float(_) => {
            if !value.is_number() {
                errors.push(ValidationError::type_error(path.to_string(), "a number"));
            }
        }
        FieldKind::Bool => {
            if !value.is_boolean() {
                errors.push(ValidationError::type_error(path.to_string(), "a boolean"));
            }
        }
        FieldKind::Array(elem) => match value.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    check_kind_inner(item, elem, &format!("{path}[{i}]"), errors);
                }
            }
            None => errors.push(ValidationError::type_error(path.to_string(), "an array")),
        },
        FieldKind::Object(fields) => match value.as_object() {
            Some(map) => check_fields(map, fields, path, errors),
            None => errors.push(ValidationError::type_error(path.to_string(), "an object")),
        },
        FieldKind::Reference(type_ref) => match value.as_object() {
            Some(map) => {
                // Resolved lazily, so recursion depth follows the payload
                // rather than the (possibly cyclic) type graph.
                let shape = type_ref.resolve();
                check_fields(map, shape.fields(), path, errors);
            }
            None => errors.push(ValidationError::type_error(path.to_string(), "an object")),
        },
        FieldKind::Unknown => {}
    }
}

fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}.{name}")
    }
}

/// JSON numbers arrive as i64, u64, or f64; a float still counts as an
/// integer when it has no fractional part.
fn is_integral(n: &serde_json::Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

fn is_negative(n: &serde_json::Number) -> bool {
    if let Some(i) = n.as_i64() {
        return i < 0;
    }
    if n.is_u64() {
        return false;
    }
    n.as_f64().is_some_and(|f| f < 0.0)
}

// ── Parameter validation ───────────────────────────────────

/// A raw parameter string coerced to its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

/// Attempt to coerce a raw parameter value to its declared type.
///
/// Type names are matched case-insensitively; unrecognized types pass
/// through as strings and never produce an error.
pub fn coerce_parameter(value: &str, param_type: &str) -> Result<ParamValue, String> {
    match param_type.to_lowercase().as_str() {
        "string" => Ok(ParamValue::String(value.to_string())),
        "number" | "float" | "double" => value
            .parse::<f64>()
            .map(ParamValue::Number)
            .map_err(|e| e.to_string()),
        "integer" | "int" => value
            .parse::<i64>()
            .map(ParamValue::Integer)
            .map_err(|e| e.to_string()),
        "boolean" | "bool" => value
            .parse::<bool>()
            .map(ParamValue::Boolean)
            .map_err(|e| e.to_string()),
        _ => Ok(ParamValue::String(value.to_string())),
    }
}

/// Validate declared parameters against the live request's values.
///
/// `lookup` abstracts the extraction source (path segment, query string, or
/// header); it returns `None` when the parameter is absent. Absent or empty
/// optional parameters are skipped without a type check.
pub fn validate_parameters<F>(params: &[Parameter], lookup: F) -> Vec<ValidationError>
where
    F: Fn(&Parameter) -> Option<String>,
{
    let mut errors = Vec::new();

    for param in params {
        let value = lookup(param).filter(|v| !v.is_empty());

        let Some(value) = value else {
            if param.required {
                errors.push(ValidationError {
                    field: param.name.clone(),
                    message: format!("Required parameter '{}' is missing", param.name),
                    kind: ErrorKind::Required,
                });
            }
            continue;
        };

        if coerce_parameter(&value, &param.param_type).is_err() {
            errors.push(ValidationError {
                field: param.name.clone(),
                message: format!(
                    "Parameter '{}' must be of type {}",
                    param.name, param.param_type
                ),
                kind: ErrorKind::TypeError,
            });
        }
    }

    errors
}
