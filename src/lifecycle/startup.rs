//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configuration from defaults, file, environment and flags
//! - Register every route (fatal on conflict)
//! - Start the metrics exporter if enabled
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::net::{AddrParseError, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{apply_env_overrides, load_config, validate_config, ConfigError, ServiceConfig};
use crate::context::AppContext;
use crate::docs::{RegistryError, DOCS_PATH};
use crate::http::HttpServer;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("route registration failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("invalid address: {0}")]
    Address(#[from] AddrParseError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Defaults, then the TOML file, then `PORT`, then the `--port` flag.
pub fn resolve_config(path: Option<&Path>, port: Option<u16>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => {
            let config = ServiceConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    if let Some(port) = port {
        config.listener.port = port;
    }
    Ok(config)
}

/// Build the context, bind and serve until `shutdown` fires.
pub async fn run(config: ServiceConfig, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
    let context = Arc::new(AppContext::from_config(&config)?);

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(config.listener.socket_addr()?).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        docs_url = %format!("http://localhost:{}{}", local_addr.port(), DOCS_PATH),
        "API documentation available"
    );

    HttpServer::new(config, context).run(listener, shutdown).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_default_port() {
        let config = resolve_config(None, Some(4100)).unwrap();
        assert_eq!(config.listener.port, 4100);
    }

    #[test]
    fn test_missing_config_file_is_fatal() {
        let err = resolve_config(Some(Path::new("/no/such/crud-docs.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
