//! Handler input and output types.

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::routing::error::DispatchError;
use crate::routing::matcher::PathParams;

/// What a handler sees: captured path parameters and the parsed JSON body.
///
/// By the time a handler runs, parameters and body have already been checked
/// against the route's descriptor.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    params: PathParams,
    body: Option<Value>,
}

impl RouteRequest {
    pub fn new(params: PathParams, body: Option<Value>) -> Self {
        Self { params, body }
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn param(&self, name: &str) -> Result<&str, DispatchError> {
        self.params
            .get(name)
            .ok_or_else(|| DispatchError::bad_request(format!("missing path parameter `{name}`")))
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Deserialize the body into a typed request struct.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DispatchError> {
        let body = self
            .body
            .as_ref()
            .ok_or_else(|| DispatchError::bad_request("request body is required"))?;
        T::deserialize(body).map_err(|e| DispatchError::bad_request(format!("invalid request body: {e}")))
    }
}

/// A handler's result before the dispatcher settles the status code.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    status: Option<StatusCode>,
    body: Value,
}

impl Reply {
    pub fn json<T: Serialize>(body: &T) -> Result<Self, DispatchError> {
        Ok(Self {
            status: None,
            body: serde_json::to_value(body)?,
        })
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

/// A request the dispatcher handled successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    /// Template of the matched route, e.g. `/users/{id}`.
    pub route: String,
    pub status: StatusCode,
    pub body: Value,
}
