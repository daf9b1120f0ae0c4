//! HTTP server for the measurements service.

mod config;
mod error;
mod handlers;
mod http;
mod metrics;
mod middleware;
mod request;
mod response;

pub use config::{CliArgs, ServerConfig};
pub use error::ApiError;
pub use http::MeasurementServer;
pub use metrics::Metrics;
