//! Measurements HTTP server binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use measurements::server::{CliArgs, MeasurementServer, ServerConfig};
use measurements::MeasurementDb;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    let config = args.to_config().expect("Invalid configuration");
    let server_config = ServerConfig::from(&args);

    tracing::info!("Opening measurement database with config: {:?}", config);

    let db = MeasurementDb::open(config)
        .await
        .expect("Failed to open measurement database");

    let server = MeasurementServer::new(Arc::new(db), server_config);
    server.run().await;
}
