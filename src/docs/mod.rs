//! API documentation subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RouteDescriptor (declared next to each handler)
//!     → registry.rs (one descriptor per method + path)
//!     → document.rs (utoipa OpenAPI document, registration order)
//!     → frozen with the dispatcher
//!
//! Runtime:
//!     GET /api-docs              → ui.rs (Swagger UI page)
//!     GET /api-docs/openapi.json → cached document
//! ```
//!
//! # Design Decisions
//! - The document is built from the same registry the dispatcher routes
//!   with, so documented and served routes cannot drift apart
//! - The docs endpoints are served by the HTTP layer and are not part of
//!   the document themselves

pub mod descriptor;
pub mod document;
pub mod registry;
pub mod ui;

pub use descriptor::{HttpMethod, ParamDescriptor, ResponseDescriptor, RouteDescriptor, Shape};
pub use document::{default_info, ApiDocument};
pub use registry::{RegistryError, SchemaRegistry};

/// Path of the browsable documentation page.
pub const DOCS_PATH: &str = "/api-docs";

/// Path of the raw OpenAPI document.
pub const DOCS_JSON_PATH: &str = "/api-docs/openapi.json";
