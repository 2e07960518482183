use routedoc_core::meta::{Endpoint, ParamLocation, Parameter};
use routedoc_openapi::{build_spec, OpenApiConfig};
use serde::Serialize;
use serde_json::json;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn default_config() -> OpenApiConfig {
    OpenApiConfig::new("Test API", "0.1.0")
}

#[derive(Serialize, routedoc_core::ApiSchema)]
struct User {
    name: String,
    email: String,
    age: u32,
}

#[derive(Serialize, routedoc_core::ApiSchema)]
struct CreateUserRequest {
    name: String,
    email: String,
}

// ── Envelope ────────────────────────────────────────────────────────────────

#[test]
fn empty_spec() {
    let spec = build_spec(&default_config(), &[]);
    assert_eq!(spec["openapi"], "3.1.0");
    assert_eq!(spec["info"]["title"], "Test API");
    assert_eq!(spec["info"]["version"], "0.1.0");
    assert!(spec["paths"].as_object().unwrap().is_empty());
}

#[test]
fn spec_has_description() {
    let config = default_config().with_description("A test API");
    let spec = build_spec(&config, &[]);
    assert_eq!(spec["info"]["description"], "A test API");
}

#[test]
fn spec_without_description() {
    let spec = build_spec(&default_config(), &[]);
    assert!(spec["info"].get("description").is_none());
}

#[test]
fn servers_from_host_and_base_path() {
    let config = default_config()
        .with_host("localhost:8080")
        .with_base_path("/api/v1");
    let spec = build_spec(&config, &[]);
    assert_eq!(spec["servers"][0]["url"], "http://localhost:8080/api/v1");
    assert_eq!(spec["servers"][0]["description"], "API Server");
}

#[test]
fn no_servers_without_host() {
    let spec = build_spec(&default_config(), &[]);
    assert!(spec.get("servers").is_none());
}

#[test]
fn base_path_prefixes_every_path() {
    let config = default_config().with_base_path("/api/v1");
    let endpoints = vec![Endpoint::new("GET", "/users")];
    let spec = build_spec(&config, &endpoints);
    assert!(spec["paths"].as_object().unwrap().contains_key("/api/v1/users"));
}

// ── Operations ──────────────────────────────────────────────────────────────

#[test]
fn single_get_endpoint() {
    let endpoints = vec![Endpoint::new("get", "/users").description("List users")];
    let spec = build_spec(&default_config(), &endpoints);

    let op = &spec["paths"]["/users"]["get"];
    assert_eq!(op["operationId"], "getUsers");
    assert_eq!(op["summary"], "List users");
    assert_eq!(op["description"], "List users");
    assert_eq!(op["tags"], json!(["users"]));
}

#[test]
fn methods_share_a_path_entry() {
    let endpoints = vec![
        Endpoint::new("GET", "/users"),
        Endpoint::new("POST", "/users"),
    ];
    let spec = build_spec(&default_config(), &endpoints);

    let entry = spec["paths"]["/users"].as_object().unwrap();
    assert!(entry.contains_key("get"));
    assert!(entry.contains_key("post"));
}

#[test]
fn operation_id_skips_api_and_version_segments() {
    let endpoints = vec![Endpoint::new("GET", "/api/v1/users/{id}")];
    let spec = build_spec(&default_config(), &endpoints);
    let op = &spec["paths"]["/api/v1/users/{id}"]["get"];
    assert_eq!(op["operationId"], "getUsersById");
}

#[test]
fn operation_id_handles_colon_params() {
    let endpoints = vec![Endpoint::new("DELETE", "/users/:userId")];
    let spec = build_spec(&default_config(), &endpoints);
    let op = &spec["paths"]["/users/:userId"]["delete"];
    assert_eq!(op["operationId"], "deleteUsersByUserId");
}

#[test]
fn tag_is_first_resource_segment() {
    let endpoints = vec![Endpoint::new("GET", "/api/v2/orders/{id}/items")];
    let spec = build_spec(&default_config(), &endpoints);
    let op = &spec["paths"]["/api/v2/orders/{id}/items"]["get"];
    assert_eq!(op["tags"], json!(["orders"]));
}

// ── Parameters ──────────────────────────────────────────────────────────────

#[test]
fn parameter_spec() {
    let endpoints = vec![Endpoint::new("GET", "/users/{id}")
        .parameter(
            Parameter::new("id", ParamLocation::Path, "integer", true)
                .with_description("User identifier"),
        )
        .parameter(Parameter::new("verbose", ParamLocation::Query, "boolean", false))];
    let spec = build_spec(&default_config(), &endpoints);

    let params = spec["paths"]["/users/{id}"]["get"]["parameters"]
        .as_array()
        .unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params[0]["name"], "id");
    assert_eq!(params[0]["in"], "path");
    assert_eq!(params[0]["description"], "User identifier");
    assert_eq!(params[0]["required"], true);
    assert_eq!(params[0]["schema"]["type"], "integer");
    assert_eq!(params[1]["in"], "query");
    assert_eq!(params[1]["schema"]["type"], "boolean");
}

#[test]
fn unknown_parameter_type_maps_to_string() {
    let endpoints = vec![Endpoint::new("GET", "/users")
        .parameter(Parameter::new("token", ParamLocation::Header, "opaque", true))];
    let spec = build_spec(&default_config(), &endpoints);
    let params = spec["paths"]["/users"]["get"]["parameters"]
        .as_array()
        .unwrap();
    assert_eq!(params[0]["schema"]["type"], "string");
}

// ── Bodies and components ───────────────────────────────────────────────────

#[test]
fn request_body_with_schema_and_example() {
    let endpoints = vec![Endpoint::new("POST", "/users").request_body::<CreateUserRequest>()];
    let spec = build_spec(&default_config(), &endpoints);

    let body = &spec["paths"]["/users"]["post"]["requestBody"];
    assert_eq!(body["required"], true);

    let content = &body["content"]["application/json"];
    assert_eq!(content["schema"]["title"], "CreateUserRequest");
    assert_eq!(content["example"]["email"], "user@example.com");

    assert!(spec["components"]["schemas"]
        .as_object()
        .unwrap()
        .contains_key("CreateUserRequest"));
}

#[test]
fn response_body_attached_to_success_statuses() {
    let endpoints = vec![Endpoint::new("GET", "/users/{id}")
        .response(200, "The user")
        .response(404, "Not found")
        .response_body::<User>()];
    let spec = build_spec(&default_config(), &endpoints);

    let responses = &spec["paths"]["/users/{id}"]["get"]["responses"];
    assert_eq!(responses["200"]["description"], "The user");
    assert_eq!(
        responses["200"]["content"]["application/json"]["schema"]["title"],
        "User"
    );
    assert_eq!(responses["404"]["description"], "Not found");
    assert!(responses["404"].get("content").is_none());
}

#[test]
fn default_response_when_none_declared() {
    let endpoints = vec![Endpoint::new("GET", "/health")];
    let spec = build_spec(&default_config(), &endpoints);
    assert_eq!(
        spec["paths"]["/health"]["get"]["responses"]["200"]["description"],
        "Successful response"
    );
}

#[test]
fn shared_schema_registered_once() {
    let endpoints = vec![
        Endpoint::new("GET", "/users/{id}").response(200, "ok").response_body::<User>(),
        Endpoint::new("POST", "/users").request_body::<User>(),
    ];
    let spec = build_spec(&default_config(), &endpoints);

    let schemas = spec["components"]["schemas"].as_object().unwrap();
    assert_eq!(schemas.keys().filter(|k| *k == "User").count(), 1);
}

#[test]
fn no_schemas_key_without_body_schemas() {
    let endpoints = vec![Endpoint::new("GET", "/health")];
    let spec = build_spec(&default_config(), &endpoints);
    assert!(spec["components"].get("schemas").is_none());
}

// ── Security ────────────────────────────────────────────────────────────────

#[test]
fn auth_endpoint_gets_bearer_security() {
    let endpoints = vec![Endpoint::new("GET", "/me").auth_required(true)];
    let spec = build_spec(&default_config(), &endpoints);

    assert_eq!(
        spec["paths"]["/me"]["get"]["security"],
        json!([{ "bearerAuth": [] }])
    );
    let scheme = &spec["components"]["securitySchemes"]["bearerAuth"];
    assert_eq!(scheme["type"], "http");
    assert_eq!(scheme["scheme"], "bearer");
    assert_eq!(scheme["bearerFormat"], "JWT");
}

#[test]
fn no_security_scheme_without_auth_endpoints() {
    let endpoints = vec![Endpoint::new("GET", "/users")];
    let spec = build_spec(&default_config(), &endpoints);
    assert!(spec["components"].get("securitySchemes").is_none());
    assert!(spec["paths"]["/users"]["get"].get("security").is_none());
}
