//! HTTP route handlers for the measurements server.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use super::error::ApiError;
use super::metrics::Metrics;
use super::request::QueryParams;
use super::response::IngestResponse;
use crate::db::MeasurementDb;
use crate::error::Error;
use crate::model::{Measurement, MeasurementSeries};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<MeasurementDb>,
    pub metrics: Arc<Metrics>,
}

/// Handle POST /api/ingest
///
/// Validates and stores one measurement, replying with the derived row
/// key. Validation and configuration failures come back as 400 with the
/// violated rule; store failures as 500.
pub async fn handle_ingest(
    State(state): State<AppState>,
    Json(measurement): Json<Measurement>,
) -> Result<Json<IngestResponse>, ApiError> {
    match state.db.ingest(measurement).await {
        Ok(row_key) => {
            state.metrics.ingest_samples_total.inc();
            Ok(Json(IngestResponse::stored(row_key)))
        }
        Err(e) => {
            if matches!(e, Error::Validation(_)) {
                state.metrics.ingest_rejected_total.inc();
            }
            Err(ApiError::from(e))
        }
    }
}

/// Handle GET /api/measurements
///
/// Answers a time-window query. Always replies 200 with a well-formed
/// series; internal failures degrade to an empty `measurements` array.
pub async fn handle_measurements(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Json<MeasurementSeries> {
    let series = state
        .db
        .query(
            params.sensor.as_deref(),
            params.start.as_deref(),
            params.end.as_deref(),
        )
        .await;

    state
        .metrics
        .query_points_returned_total
        .inc_by(series.measurements.len() as u64);

    Json(series)
}

/// Handle GET /metrics
pub async fn handle_metrics(State(state): State<AppState>) -> String {
    state.metrics.encode()
}

/// Handle GET /-/healthy
pub async fn handle_healthy() -> &'static str {
    "OK"
}

/// Handle GET /-/ready
pub async fn handle_ready() -> &'static str {
    "OK"
}
