//! Endpoint metadata and the registration table.
//!
//! The registry is an explicit object owned by the embedding application's
//! top-level coordinator. It is populated during single-threaded startup and
//! only read afterwards; the documentation and validation entry points never
//! mutate it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::shape::ApiSchema;
use crate::walker::{walk, WalkOutput};

/// Where a parameter is located in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
        }
    }
}

/// A declared request parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParamLocation,
    /// Declared type as an OpenAPI type string (`"string"`, `"integer"`,
    /// `"number"`, `"boolean"`). Unknown values are treated as strings.
    pub param_type: String,
    pub description: Option<String>,
    pub required: bool,
}

impl Parameter {
    pub fn new(name: &str, location: ParamLocation, param_type: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            location,
            param_type: param_type.to_string(),
            description: None,
            required,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Handle to a body schema type, captured at registration time.
///
/// Walking goes through a function pointer, so the registry holds no
/// descriptor trees; every generation or validation call derives them fresh.
#[derive(Clone, Copy)]
pub struct SchemaHandle {
    name: Option<&'static str>,
    walk: fn() -> WalkOutput,
}

impl SchemaHandle {
    /// Capture the schema of `T`.
    pub fn of<T: ApiSchema>() -> Self {
        Self {
            name: T::schema_name(),
            walk: walk::<T>,
        }
    }

    /// Declared name of the underlying type, `None` for anonymous shapes.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Walk the underlying type.
    pub fn walk(&self) -> WalkOutput {
        (self.walk)()
    }
}

impl fmt::Debug for SchemaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaHandle")
            .field(&self.name.unwrap_or("<anonymous>"))
            .finish()
    }
}

/// A documented route: method, path, parameters, and optional body schemas.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: String,
    pub path: String,
    pub description: String,
    /// Status code to description, e.g. `200 => "Successful response"`.
    pub responses: BTreeMap<u16, String>,
    pub parameters: Vec<Parameter>,
    pub request_schema: Option<SchemaHandle>,
    pub response_schema: Option<SchemaHandle>,
    pub auth_required: bool,
}

impl Endpoint {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            method: method.to_uppercase(),
            path: path.to_string(),
            description: String::new(),
            responses: BTreeMap::new(),
            parameters: Vec::new(),
            request_schema: None,
            response_schema: None,
            auth_required: false,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn response(mut self, status: u16, description: &str) -> Self {
        self.responses.insert(status, description.to_string());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn request_body<T: ApiSchema>(mut self) -> Self {
        self.request_schema = Some(SchemaHandle::of::<T>());
        self
    }

    pub fn response_body<T: ApiSchema>(mut self) -> Self {
        self.response_schema = Some(SchemaHandle::of::<T>());
        self
    }

    pub fn auth_required(mut self, required: bool) -> Self {
        self.auth_required = required;
        self
    }
}

/// Registration table for documented endpoints.
///
/// Registering the same method and path twice replaces the earlier entry.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, endpoint: Endpoint) {
        tracing::debug!(
            method = %endpoint.method,
            path = %endpoint.path,
            "registering documented endpoint"
        );
        if let Some(existing) = self
            .endpoints
            .iter_mut()
            .find(|e| e.method == endpoint.method && e.path == endpoint.path)
        {
            *existing = endpoint;
        } else {
            self.endpoints.push(endpoint);
        }
    }

    /// Registered endpoints, in registration order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn get(&self, method: &str, path: &str) -> Option<&Endpoint> {
        let method = method.to_uppercase();
        self.endpoints
            .iter()
            .find(|e| e.method == method && e.path == path)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
