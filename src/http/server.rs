//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: docs endpoints plus a dispatcher fallback
//!   (also for other methods on the docs paths, so those get 404, not 405)
//! - Wire up middleware (tracing, request ID, timeout, body limit)
//! - Bind server to listener and shut down gracefully
//! - Record per-request metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{Method, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::context::AppContext;
use crate::docs::{ApiDocument, DOCS_JSON_PATH, DOCS_PATH};
use crate::http::request::{request_id, UuidRequestId};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;

/// Application state injected into handlers.
pub type AppState = Arc<AppContext>;

/// HTTP server for the service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    pub fn new(config: ServiceConfig, context: AppState) -> Self {
        let router = Self::build_router(&config, context);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(DOCS_PATH, get(docs_page).fallback(dispatch_handler))
            .route(&format!("{DOCS_PATH}/"), get(docs_page).fallback(dispatch_handler))
            .route(DOCS_JSON_PATH, get(docs_json).fallback(dispatch_handler))
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.limits.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The router with every layer applied, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

async fn docs_page(State(state): State<AppState>) -> Html<String> {
    Html(state.docs_page().to_string())
}

async fn docs_json(State(state): State<AppState>) -> Json<ApiDocument> {
    Json(state.dispatcher().document().clone())
}

/// Every request not served by the docs routes goes through the dispatcher.
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let path = uri.path();

    tracing::debug!(
        request_id = %request_id(&headers),
        method = %method,
        path = %path,
        "Dispatching request"
    );

    match state.dispatcher().handle(&method, path, &body) {
        Ok(dispatched) => {
            metrics::record_request(method.as_str(), &dispatched.route, dispatched.status.as_u16(), start);
            dispatched.into_response()
        }
        Err(err) => {
            tracing::debug!(
                request_id = %request_id(&headers),
                error = %err,
                "Request rejected"
            );
            let route = state
                .dispatcher()
                .route_template(&method, path)
                .unwrap_or(metrics::UNMATCHED_ROUTE);
            metrics::record_request(method.as_str(), route, err.status_code().as_u16(), start);
            err.into_response()
        }
    }
}
