//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, body bytes)
//!     → router.rs (route lookup, first match wins)
//!     → matcher.rs (segment match, capture `{name}` parameters)
//!     → descriptor checks (parameter types, body shape)
//!     → Handler → Reply → Dispatched or DispatchError
//!
//! Route Compilation (at startup):
//!     add_route(method, template, handler, descriptor)
//!     → parse template, check descriptor agrees with it
//!     → register descriptor + dispatch entry together
//!     → build(): render document, freeze as immutable Dispatcher
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod error;
pub mod matcher;
pub mod reply;
pub mod router;

pub use error::DispatchError;
pub use matcher::{PathParams, PathTemplate};
pub use reply::{Dispatched, Reply, RouteRequest};
pub use router::{Dispatcher, DispatcherBuilder, Handler};
