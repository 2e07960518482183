use serde_json::{json, Map, Value};

use routedoc_core::meta::Endpoint;

use crate::example::generate_example;
use crate::schema::{emit_schema, SchemaRegistry};

/// Configuration for the generated OpenAPI specification.
pub struct OpenApiConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub host: Option<String>,
    pub base_path: String,
}

impl OpenApiConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            title: title.to_string(),
            version: version.to_string(),
            description: None,
            host: None,
            base_path: String::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }
}

/// Build an OpenAPI 3.1.0 JSON spec from config and registered endpoints.
///
/// Every call rebuilds the component registry from scratch; the registry is
/// never shared across calls.
pub fn build_spec(config: &OpenApiConfig, endpoints: &[Endpoint]) -> Value {
    tracing::debug!(endpoints = endpoints.len(), "building OpenAPI spec");

    let mut registry = SchemaRegistry::new();
    let mut paths: Map<String, Value> = Map::new();
    let has_auth = endpoints.iter().any(|e| e.auth_required);

    for endpoint in endpoints {
        let method_lower = endpoint.method.to_lowercase();
        let full_path = format!("{}{}", config.base_path, endpoint.path);

        let mut operation: Map<String, Value> = Map::new();
        operation.insert(
            "operationId".into(),
            json!(operation_id(&endpoint.method, &endpoint.path)),
        );

        if let Some(tag) = extract_tag(&endpoint.path) {
            operation.insert("tags".into(), json!([tag]));
        }

        if !endpoint.description.is_empty() {
            operation.insert("summary".into(), json!(endpoint.description));
            operation.insert("description".into(), json!(endpoint.description));
        }

        // Parameters
        let params: Vec<Value> = endpoint
            .parameters
            .iter()
            .map(|p| {
                let mut spec = Map::new();
                spec.insert("name".into(), json!(p.name));
                spec.insert("in".into(), json!(p.location.as_str()));
                if let Some(ref desc) = p.description {
                    spec.insert("description".into(), json!(desc));
                }
                spec.insert("required".into(), json!(p.required));
                spec.insert("schema".into(), param_schema(&p.param_type));
                Value::Object(spec)
            })
            .collect();

        if !params.is_empty() {
            operation.insert("parameters".into(), json!(params));
        }

        // Request body
        if let Some(ref handle) = endpoint.request_schema {
            let output = handle.walk();
            let schema = emit_schema(&output, &mut registry);
            let example = generate_example(&output);
            operation.insert(
                "requestBody".into(),
                json!({
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": schema,
                            "example": example
                        }
                    }
                }),
            );
        }

        // Responses
        let mut responses: Map<String, Value> = Map::new();
        for (status, description) in &endpoint.responses {
            let mut response = Map::new();
            response.insert("description".into(), json!(description));

            // Response bodies are attached to success statuses only.
            if matches!(*status, 200 | 201) {
                if let Some(ref handle) = endpoint.response_schema {
                    let output = handle.walk();
                    let schema = emit_schema(&output, &mut registry);
                    let example = generate_example(&output);
                    response.insert(
                        "content".into(),
                        json!({
                            "application/json": {
                                "schema": schema,
                                "example": example
                            }
                        }),
                    );
                }
            }

            responses.insert(status.to_string(), Value::Object(response));
        }
        if responses.is_empty() {
            responses.insert("200".into(), json!({ "description": "Successful response" }));
        }
        operation.insert("responses".into(), Value::Object(responses));

        // Security
        if endpoint.auth_required {
            operation.insert("security".into(), json!([{ "bearerAuth": [] }]));
        }

        let path_entry = paths.entry(full_path).or_insert_with(|| json!({}));
        if let Some(obj) = path_entry.as_object_mut() {
            obj.insert(method_lower, Value::Object(operation));
        }
    }

    let mut info: Map<String, Value> = Map::new();
    info.insert("title".into(), json!(config.title));
    info.insert("version".into(), json!(config.version));
    if let Some(ref desc) = config.description {
        info.insert("description".into(), json!(desc));
    }

    let mut components: Map<String, Value> = Map::new();
    if has_auth {
        components.insert(
            "securitySchemes".into(),
            json!({
                "bearerAuth": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT",
                    "description": "JWT Authorization header using the Bearer scheme"
                }
            }),
        );
    }
    let schemas = registry.into_schemas();
    if !schemas.is_empty() {
        components.insert("schemas".into(), Value::Object(schemas));
    }

    let mut spec: Map<String, Value> = Map::new();
    spec.insert("openapi".into(), json!("3.1.0"));
    spec.insert("info".into(), Value::Object(info));
    if let Some(ref host) = config.host {
        spec.insert(
            "servers".into(),
            json!([{
                "url": format!("http://{}{}", host, config.base_path),
                "description": "API Server"
            }]),
        );
    }
    spec.insert("paths".into(), Value::Object(paths));
    spec.insert("components".into(), Value::Object(components));

    Value::Object(spec)
}

/// Schema node for a declared parameter type; unknown types degrade to
/// string.
fn param_schema(param_type: &str) -> Value {
    match param_type.to_lowercase().as_str() {
        "number" | "float" | "double" => json!({ "type": "number" }),
        "integer" | "int" => json!({ "type": "integer" }),
        "boolean" | "bool" => json!({ "type": "boolean" }),
        _ => json!({ "type": "string" }),
    }
}

/// Derive an operation id from method and path.
/// Example: `GET /api/v1/users/{id}` becomes `getUsersById`.
fn operation_id(method: &str, path: &str) -> String {
    let mut id = method.to_lowercase();

    for segment in path.trim_matches('/').split('/') {
        if segment.is_empty() {
            continue;
        }
        // Skip common prefixes like "api", "v1", "v2", etc.
        if segment == "api" || (segment.starts_with('v') && segment.len() <= 3) {
            continue;
        }

        if let Some(param) = path_param(segment) {
            id.push_str("By");
            id.push_str(&title_case(param));
        } else {
            id.push_str(&title_case(segment));
        }
    }

    id
}

/// Extract a resource tag from the path: the first segment that is not
/// `api`, not version-like, and not a parameter.
fn extract_tag(path: &str) -> Option<String> {
    path.trim_matches('/')
        .split('/')
        .find(|segment| {
            !segment.is_empty()
                && *segment != "api"
                && !segment.starts_with('v')
                && path_param(segment).is_none()
        })
        .map(|segment| segment.to_string())
}

/// Recognize `{id}` and `:id` path parameter segments.
fn path_param(segment: &str) -> Option<&str> {
    if let Some(name) = segment.strip_prefix(':') {
        return Some(name);
    }
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
