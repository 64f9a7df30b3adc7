//! CRUD demo service with generated OpenAPI documentation.

pub mod config;
pub mod context;
pub mod docs;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resources;
pub mod routing;

pub use config::ServiceConfig;
pub use context::AppContext;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
