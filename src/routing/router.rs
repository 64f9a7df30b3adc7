//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Register a handler together with its descriptor, all or nothing
//! - Look up the route for (method, path)
//! - Check path parameters and the request body against the descriptor
//! - Invoke the handler and settle the response status
//!
//! # Design Decisions
//! - Immutable after `build` (shared via `Arc` without locks)
//! - O(n) template scan, first registered match wins
//! - Explicit `NotFound` rather than a silent default
//! - HEAD is answered by the GET route; the transport drops the body
//! - Handlers are synchronous and pure; they never see unchecked input

use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use serde_json::Value;

use crate::docs::{ApiDocument, HttpMethod, RegistryError, RouteDescriptor, SchemaRegistry, Shape};
use crate::routing::error::DispatchError;
use crate::routing::matcher::{PathParams, PathTemplate};
use crate::routing::reply::{Dispatched, Reply, RouteRequest};

/// A route handler: (path parameters, body) in, reply out.
pub trait Handler: Send + Sync {
    fn call(&self, request: RouteRequest) -> Result<Reply, DispatchError>;
}

impl<F> Handler for F
where
    F: Fn(RouteRequest) -> Result<Reply, DispatchError> + Send + Sync,
{
    fn call(&self, request: RouteRequest) -> Result<Reply, DispatchError> {
        self(request)
    }
}

struct Route {
    method: HttpMethod,
    template: PathTemplate,
    params: Vec<(String, Shape)>,
    request_body: Option<Shape>,
    handler: Arc<dyn Handler>,
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template.as_str())
            .finish_non_exhaustive()
    }
}

impl Route {
    fn check_params(&self, params: &PathParams) -> Result<(), DispatchError> {
        for (name, shape) in &self.params {
            let raw = params.get(name).unwrap_or_default();
            if !shape.accepts_segment(raw) {
                return Err(DispatchError::bad_request(format!(
                    "path parameter `{name}` must be of type {}",
                    shape.type_name()
                )));
            }
        }
        Ok(())
    }

    fn read_body(&self, raw: &[u8]) -> Result<Option<Value>, DispatchError> {
        let body = if raw.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            let value: Value = serde_json::from_slice(raw)
                .map_err(|e| DispatchError::bad_request(format!("malformed JSON body: {e}")))?;
            Some(value)
        };

        let Some(shape) = &self.request_body else {
            return Ok(body);
        };
        match body {
            None => Err(DispatchError::bad_request("request body is required")),
            Some(value) => {
                shape
                    .check(&value)
                    .map_err(|mismatch| DispatchError::bad_request(mismatch.to_string()))?;
                Ok(Some(value))
            }
        }
    }
}

/// Collects routes and descriptors during startup.
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    registry: SchemaRegistry,
    routes: Vec<Route>,
}

impl DispatcherBuilder {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            routes: Vec::new(),
        }
    }

    /// Register a handler and its descriptor.
    ///
    /// The template is parsed and the descriptor checked against it before
    /// anything is stored; on error neither the dispatch entry nor the
    /// descriptor is committed.
    pub fn add_route<H>(
        &mut self,
        method: HttpMethod,
        template: &str,
        handler: H,
        descriptor: RouteDescriptor,
    ) -> Result<(), RegistryError>
    where
        H: Handler + 'static,
    {
        let template = PathTemplate::parse(template)?;
        let mismatch = |reason: String| RegistryError::DescriptorMismatch {
            route: format!("{method} {}", template.as_str()),
            reason,
        };

        if descriptor.method != method || descriptor.path != template.as_str() {
            return Err(mismatch(format!(
                "descriptor is for {} {}",
                descriptor.method, descriptor.path
            )));
        }

        let mut params = Vec::new();
        for name in template.param_names() {
            let declared = descriptor
                .parameter(name)
                .ok_or_else(|| mismatch(format!("path parameter `{name}` is not documented")))?;
            if !declared.shape.is_primitive() {
                return Err(mismatch(format!("path parameter `{name}` must be a primitive")));
            }
            params.push((name.to_string(), declared.shape.clone()));
        }
        if let Some(extra) = descriptor
            .parameters
            .iter()
            .find(|p| !template.param_names().any(|name| name == p.name))
        {
            return Err(mismatch(format!(
                "documented parameter `{}` is not in the path",
                extra.name
            )));
        }

        let request_body = descriptor.request_body.clone();
        self.registry.register(descriptor)?;
        self.routes.push(Route {
            method,
            template,
            params,
            request_body,
            handler: Arc::new(handler),
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Render the document and freeze the routing table.
    pub fn build(mut self) -> Dispatcher {
        let document = self.registry.build().clone();
        tracing::info!(
            routes = self.routes.len(),
            paths = document.path_count(),
            "Dispatcher built"
        );
        Dispatcher {
            routes: self.routes,
            document,
        }
    }
}

/// Immutable routing table plus the document describing it.
#[derive(Debug)]
pub struct Dispatcher {
    routes: Vec<Route>,
    document: ApiDocument,
}

impl Dispatcher {
    pub fn builder(registry: SchemaRegistry) -> DispatcherBuilder {
        DispatcherBuilder::new(registry)
    }

    /// First registered route for (method, path). HEAD is served by the GET route.
    fn find(&self, method: &Method, path: &str) -> Option<(&Route, PathParams)> {
        let kind = if *method == Method::HEAD {
            HttpMethod::Get
        } else {
            HttpMethod::from_http(method)?
        };
        self.routes
            .iter()
            .filter(|route| route.method == kind)
            .find_map(|route| route.template.matches(path).map(|params| (route, params)))
    }

    /// Template of the route that would serve (method, path), if any.
    pub fn route_template(&self, method: &Method, path: &str) -> Option<&str> {
        self.find(method, path).map(|(route, _)| route.template.as_str())
    }

    /// Route one request.
    pub fn handle(&self, method: &Method, path: &str, body: &[u8]) -> Result<Dispatched, DispatchError> {
        let (route, params) = self.find(method, path).ok_or_else(|| {
            tracing::debug!(method = %method, path = %path, "No route matched");
            DispatchError::NotFound {
                method: method.to_string(),
                path: path.to_string(),
            }
        })?;
        let kind = route.method;

        route.check_params(&params)?;
        let body = route.read_body(body).inspect_err(|e| {
            tracing::debug!(route = %route.template.as_str(), error = %e, "Rejected request body");
        })?;

        let reply = route.handler.call(RouteRequest::new(params, body))?;
        let status = reply.status().unwrap_or_else(|| kind.default_status());

        Ok(Dispatched {
            route: route.template.as_str().to_string(),
            status,
            body: reply.into_body(),
        })
    }

    pub fn document(&self) -> &ApiDocument {
        &self.document
    }

    /// Registered (method, template) pairs in registration order.
    pub fn routes(&self) -> impl Iterator<Item = (HttpMethod, &str)> {
        self.routes.iter().map(|r| (r.method, r.template.as_str()))
    }
}
