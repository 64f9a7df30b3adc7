//! Schema registry: route descriptors aggregated into one document.
//!
//! # Responsibilities
//! - Hold one descriptor per (method, path)
//! - Reject duplicates without touching existing state
//! - Render the OpenAPI document in registration order and cache it
//!
//! # Design Decisions
//! - Populated once at startup, read-only afterwards
//! - A registration after `build` drops the cached document so a stale
//!   document is never served

use std::collections::HashSet;

use thiserror::Error;

use crate::docs::descriptor::{HttpMethod, RouteDescriptor};
use utoipa::openapi::{Info, Server};

use crate::docs::document::{default_info, ApiDocument};

/// Startup-time registration failures. All of them are fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("route {method} {path} is already registered")]
    DuplicateRoute { method: HttpMethod, path: String },

    #[error("invalid path template `{template}`: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("descriptor does not match route {route}: {reason}")]
    DescriptorMismatch { route: String, reason: String },
}

#[derive(Debug)]
pub struct SchemaRegistry {
    info: Info,
    servers: Vec<Server>,
    routes: Vec<RouteDescriptor>,
    keys: HashSet<(HttpMethod, String)>,
    cached: Option<ApiDocument>,
}

impl SchemaRegistry {
    pub fn new(info: Info, servers: Vec<Server>) -> Self {
        Self {
            info,
            servers,
            routes: Vec::new(),
            keys: HashSet::new(),
            cached: None,
        }
    }

    pub fn register(&mut self, descriptor: RouteDescriptor) -> Result<(), RegistryError> {
        let key = (descriptor.method, descriptor.path.clone());
        if self.keys.contains(&key) {
            return Err(RegistryError::DuplicateRoute {
                method: descriptor.method,
                path: descriptor.path,
            });
        }

        tracing::debug!(
            method = %descriptor.method,
            path = %descriptor.path,
            "Route descriptor registered"
        );

        self.keys.insert(key);
        self.routes.push(descriptor);
        self.cached = None;
        Ok(())
    }

    pub fn contains(&self, method: HttpMethod, path: &str) -> bool {
        self.keys.contains(&(method, path.to_string()))
    }

    pub fn descriptors(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Render the document from the registered descriptors and cache it.
    pub fn build(&mut self) -> &ApiDocument {
        let mut document = ApiDocument::new(self.info.clone(), self.servers.clone());
        for descriptor in &self.routes {
            document.insert(descriptor);
        }
        self.cached.insert(document)
    }

    /// The document from the last `build`, if still current.
    pub fn document(&self) -> Option<&ApiDocument> {
        self.cached.as_ref()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(default_info(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::descriptor::Shape;

    fn list(path: &str) -> RouteDescriptor {
        RouteDescriptor::new(HttpMethod::Get, path, "list")
            .response(200, "ok", Some(Shape::array(Shape::String)))
    }

    #[test]
    fn test_duplicate_rejected_and_state_kept() {
        let mut registry = SchemaRegistry::default();
        registry.register(list("/users")).unwrap();

        let err = registry.register(list("/users")).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateRoute {
                method: HttpMethod::Get,
                path: "/users".into()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_path_other_method_allowed() {
        let mut registry = SchemaRegistry::default();
        registry.register(list("/users")).unwrap();
        registry
            .register(RouteDescriptor::new(HttpMethod::Post, "/users", "create"))
            .unwrap();

        assert!(registry.contains(HttpMethod::Post, "/users"));
        assert_eq!(registry.build().operation_count(), 2);
    }

    #[test]
    fn test_build_keeps_registration_order() {
        let mut registry = SchemaRegistry::default();
        registry.register(list("/users")).unwrap();
        registry.register(list("/products")).unwrap();
        registry
            .register(RouteDescriptor::new(HttpMethod::Delete, "/users/{id}", "delete"))
            .unwrap();

        let routes = registry.build().routes();
        assert_eq!(
            routes,
            vec![
                (HttpMethod::Get, "/users"),
                (HttpMethod::Get, "/products"),
                (HttpMethod::Delete, "/users/{id}"),
            ]
        );
    }

    #[test]
    fn test_document_cache_invalidated_by_register() {
        let mut registry = SchemaRegistry::default();
        assert!(registry.document().is_none());

        registry.register(list("/users")).unwrap();
        registry.build();
        assert_eq!(registry.document().map(|d| d.operation_count()), Some(1));

        registry.register(list("/products")).unwrap();
        assert!(registry.document().is_none());
        assert_eq!(registry.build().operation_count(), 2);
    }

    #[test]
    fn test_round_trip_through_document() {
        let descriptor = RouteDescriptor::new(HttpMethod::Post, "/products", "Shto një produkt të ri")
            .request_body(Shape::object([("name", Shape::String)]))
            .response(
                201,
                "Produkti u shtua",
                Some(Shape::object([("id", Shape::Integer), ("name", Shape::String)])),
            );

        let mut registry = SchemaRegistry::default();
        registry.register(descriptor.clone()).unwrap();

        let document = registry.build();
        assert_eq!(document.describe(HttpMethod::Post, "/products"), Some(descriptor));
    }
}
