//! HTTP server implementation using Axum.

use crate::handlers::{handle_export, handle_health, handle_rpc};
use airq_core::AirqApi;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Upper bound on requests processed at once.
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Application state shared across handlers.
pub struct AppState {
    /// Dataset, thresholds and sessions
    pub api: AirqApi,
    shutdown: watch::Sender<bool>,
}

impl AppState {
    pub fn new(api: AirqApi) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self { api, shutdown }
    }

    /// Ask the server to stop accepting connections and drain in-flight requests.
    pub fn request_shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

/// A running server.
pub struct ServerHandle {
    /// Address the listener is bound to
    pub addr: SocketAddr,
    /// Completes once a shutdown request has been served and connections drained
    pub task: JoinHandle<()>,
}

/// Build the router with all routes and layers.
pub fn router(state: Arc<AppState>) -> Router {
    // Configure CORS for the browser front end
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/rpc", post(handle_rpc))
        .route("/export/:session_id", get(handle_export))
        .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the JSON-RPC HTTP server.
///
/// The handle carries the actual bound address (useful when port=0) and the
/// serving task, which finishes after the `shutdown` RPC method is called.
pub async fn start_server(api: AirqApi, host: &str, port: u16) -> anyhow::Result<ServerHandle> {
    let state = Arc::new(AppState::new(api));
    let mut shutdown = state.shutdown_signal();
    let app = router(state);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    let task = tokio::spawn(async move {
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
            info!("Shutdown requested, draining connections");
        });
        if let Err(e) = server.await {
            error!("Server error: {}", e);
        }
    });

    Ok(ServerHandle {
        addr: actual_addr,
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use airq_core::{DashboardSettings, Dataset};

    #[tokio::test]
    async fn test_server_starts() {
        let api = AirqApi::from_dataset(Dataset::default(), DashboardSettings::default()).unwrap();
        let server = start_server(api, "127.0.0.1", 0).await.unwrap();
        assert!(server.addr.port() > 0);
    }

    #[tokio::test]
    async fn test_shutdown_method_stops_server() {
        let api = AirqApi::from_dataset(Dataset::default(), DashboardSettings::default()).unwrap();
        let server = start_server(api, "127.0.0.1", 0).await.unwrap();

        let response: serde_json::Value = reqwest::Client::new()
            .post(format!("http://{}/rpc", server.addr))
            .json(&serde_json::json!({"jsonrpc": "2.0", "method": "shutdown", "id": 1}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(response["result"]["status"], "shutting_down");

        tokio::time::timeout(std::time::Duration::from_secs(5), server.task)
            .await
            .expect("server did not stop")
            .unwrap();
    }

    #[test]
    fn test_request_shutdown_sets_flag() {
        let api = AirqApi::from_dataset(Dataset::default(), DashboardSettings::default()).unwrap();
        let state = AppState::new(api);
        let signal = state.shutdown_signal();
        assert!(!*signal.borrow());
        state.request_shutdown();
        assert!(*signal.borrow());
    }

    #[tokio::test]
    async fn test_invalid_host_rejected() {
        let api = AirqApi::from_dataset(Dataset::default(), DashboardSettings::default()).unwrap();
        assert!(start_server(api, "not a host", 0).await.is_err());
    }
}
