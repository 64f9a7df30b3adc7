//! Declarative route descriptors.
//!
//! # Responsibilities
//! - Describe one endpoint: method, path template, summary, path parameters,
//!   request body shape and response shapes per status code
//! - Check request values against a declared shape at the dispatch boundary
//!
//! # Design Decisions
//! - Descriptors are data registered next to the handler, never comments
//! - `Shape` serializes as the OpenAPI schema object it stands for, so the
//!   document embeds it without a second schema model
//! - Shape checks are structural only: declared properties must be present
//!   with the declared type, extra properties are ignored

use std::fmt;

use axum::http::{Method, StatusCode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP methods a route may be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Map a transport method. Anything outside GET/POST/PUT/DELETE is `None`.
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            Method::PUT => Some(Self::Put),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Status used when a handler does not pick one: 201 for POST, 200 otherwise.
    pub fn default_status(&self) -> StatusCode {
        match self {
            Self::Post => StatusCode::CREATED,
            _ => StatusCode::OK,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON value shape, serialized as an OpenAPI schema object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Integer,
    Number,
    String,
    Boolean,
    Array { items: Box<Shape> },
    Object {
        #[serde(default)]
        properties: IndexMap<String, Shape>,
    },
}

impl Shape {
    pub fn array(items: Shape) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Shape)>,
        K: Into<String>,
    {
        Self::Object {
            properties: properties
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array { .. } => "array",
            Self::Object { .. } => "object",
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::Array { .. } | Self::Object { .. })
    }

    /// Check a raw path segment against a primitive shape.
    pub fn accepts_segment(&self, raw: &str) -> bool {
        match self {
            Self::Integer => raw.parse::<i64>().is_ok(),
            Self::Number => raw.parse::<f64>().is_ok(),
            Self::Boolean => raw == "true" || raw == "false",
            Self::String => true,
            Self::Array { .. } | Self::Object { .. } => false,
        }
    }

    /// Check a JSON value against this shape.
    pub fn check(&self, value: &Value) -> Result<(), ShapeMismatch> {
        self.check_at(value, "body")
    }

    fn check_at(&self, value: &Value, at: &str) -> Result<(), ShapeMismatch> {
        let ok = match self {
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Array { items } => {
                let Some(values) = value.as_array() else {
                    return Err(ShapeMismatch::wrong_type(at, self));
                };
                for (i, item) in values.iter().enumerate() {
                    items.check_at(item, &format!("{at}[{i}]"))?;
                }
                true
            }
            Self::Object { properties } => {
                let Some(fields) = value.as_object() else {
                    return Err(ShapeMismatch::wrong_type(at, self));
                };
                for (name, shape) in properties {
                    let field_at = format!("{at}.{name}");
                    match fields.get(name) {
                        Some(field) => shape.check_at(field, &field_at)?,
                        None => return Err(ShapeMismatch::missing(field_at)),
                    }
                }
                true
            }
        };

        if ok {
            Ok(())
        } else {
            Err(ShapeMismatch::wrong_type(at, self))
        }
    }
}

/// A value did not match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    pub at: String,
    pub expected: Option<&'static str>,
}

impl ShapeMismatch {
    fn wrong_type(at: &str, shape: &Shape) -> Self {
        Self {
            at: at.to_string(),
            expected: Some(shape.type_name()),
        }
    }

    fn missing(at: String) -> Self {
        Self { at, expected: None }
    }
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected {
            Some(expected) => write!(f, "`{}` must be of type {}", self.at, expected),
            None => write!(f, "`{}` is required", self.at),
        }
    }
}

impl std::error::Error for ShapeMismatch {}

/// A path parameter. Always `in: path` and required.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDescriptor {
    pub name: String,
    pub shape: Shape,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    pub description: String,
    /// JSON body shape, if the response documents one.
    pub body: Option<Shape>,
}

/// Documentation for exactly one registered route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub summary: String,
    pub parameters: Vec<ParamDescriptor>,
    pub request_body: Option<Shape>,
    pub responses: IndexMap<u16, ResponseDescriptor>,
}

impl RouteDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            summary: summary.into(),
            parameters: Vec::new(),
            request_body: None,
            responses: IndexMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, shape: Shape, description: impl Into<String>) -> Self {
        self.parameters.push(ParamDescriptor {
            name: name.into(),
            shape,
            description: description.into(),
        });
        self
    }

    pub fn request_body(mut self, shape: Shape) -> Self {
        self.request_body = Some(shape);
        self
    }

    pub fn response(mut self, status: u16, description: impl Into<String>, body: Option<Shape>) -> Self {
        self.responses.insert(
            status,
            ResponseDescriptor {
                description: description.into(),
                body,
            },
        );
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ParamDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
