//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID generated or kept from the client)
//!     → /api-docs, /api-docs/openapi.json served directly
//!     → everything else handed to the dispatcher
//!     → response.rs (Dispatched / DispatchError into HTTP responses)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
