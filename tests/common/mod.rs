//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crud_docs::config::ServiceConfig;
use crud_docs::context::AppContext;
use crud_docs::http::HttpServer;
use crud_docs::lifecycle::Shutdown;
use tokio::net::TcpListener;

/// A running service on an ephemeral port. Shuts down on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(ServiceConfig::default()).await
    }

    #[allow(dead_code)]
    pub async fn start_with(mut config: ServiceConfig) -> Self {
        config.listener.host = "127.0.0.1".into();
        config.listener.port = 0;

        let context = Arc::new(AppContext::from_config(&config).unwrap());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config, context);
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        // Wait for the accept loop to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
