//! CRUD demo service
//!
//! Serves two in-memory resources and documents them with OpenAPI.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ /api-docs ─────────────▶ Swagger UI page
//!                         │       ──▶ /api-docs/openapi.json ▶ cached document
//!                         ▼
//!                     dispatcher (routing)
//!                         │  match template, check params + body
//!                         ▼
//!                     resource handler ──▶ fixture store
//!
//!     Startup: config → logging → routes + descriptors → document → bind
//! ```

use std::path::PathBuf;

use clap::Parser;

use crud_docs::lifecycle::{self, Shutdown};
use crud_docs::observability::logging;

#[derive(Parser)]
#[command(name = "crud-docs")]
#[command(about = "CRUD demo service with OpenAPI documentation", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overrides the config file and PORT
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = lifecycle::resolve_config(cli.config.as_deref(), cli.port)?;
    logging::init_logging(&config.observability);

    tracing::info!("crud-docs v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        request_timeout_secs = config.limits.request_timeout_secs,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    lifecycle::run(config, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
