//! HTTP server implementation for the measurements service.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::signal;

use super::config::ServerConfig;
use super::handlers::{
    handle_healthy, handle_ingest, handle_measurements, handle_metrics, handle_ready, AppState,
};
use super::metrics::Metrics;
use super::middleware::{trace_requests, track_metrics};
use crate::db::MeasurementDb;

/// HTTP server for the measurements service.
pub struct MeasurementServer {
    db: Arc<MeasurementDb>,
    config: ServerConfig,
}

impl MeasurementServer {
    /// Create a new measurement server.
    pub fn new(db: Arc<MeasurementDb>, config: ServerConfig) -> Self {
        Self { db, config }
    }

    /// Run the HTTP server until SIGINT/SIGTERM.
    pub async fn run(self) {
        let metrics = Arc::new(Metrics::new());

        let state = AppState {
            db: self.db,
            metrics: metrics.clone(),
        };

        let app = Router::new()
            .route("/api/ingest", post(handle_ingest))
            .route("/api/measurements", get(handle_measurements))
            .route("/metrics", get(handle_metrics))
            .route("/-/healthy", get(handle_healthy))
            .route("/-/ready", get(handle_ready))
            .layer(middleware::from_fn(trace_requests))
            .layer(middleware::from_fn_with_state(metrics, track_metrics))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        tracing::info!("Starting measurements HTTP server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind server address");
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .expect("server error");

        tracing::info!("Server shut down gracefully");
    }
}

/// Listen for SIGTERM (pod termination) and SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
