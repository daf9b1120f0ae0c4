//! Homedata Measurements - sensor sample ingestion and range queries.
//!
//! The service ingests single-reading samples (temperature, humidity,
//! pressure) tagged with a sensor identity and timestamp, persists them in a
//! partition/sort-keyed table store, and answers time-window queries with a
//! charting-friendly number of points.
//!
//! # Architecture
//!
//! Samples flow through a short pipeline: the validator rejects malformed
//! readings, the key deriver turns the sensor identity and timestamp into a
//! partition key and a lexically-ordered sort key, and the store adapter
//! persists one row per sample. Queries derive sort-key bounds for the
//! requested window, read the range back, and run the result through the
//! Largest-Triangle-Three-Buckets downsampler whenever it exceeds the chart
//! point budget.
//!
//! # Key Concepts
//!
//! - **MeasurementDb**: The main entry point providing ingest and query.
//! - **Sort keys**: Fixed-width UTC ISO-8601 timestamps, so lexical order
//!   over keys equals chronological order and the store can range-scan by
//!   plain string comparison.
//! - **Degraded reads**: The query path returns an empty series instead of
//!   failing when the store or the downsampler misbehaves; a dashboard can
//!   live with an empty chart but not with a broken page.
//!
//! # Example
//!
//! ```ignore
//! use measurements::{Config, Measurement, MeasurementDb, Readings};
//!
//! let db = MeasurementDb::open(Config::default()).await?;
//!
//! let row_key = db.ingest(Measurement {
//!     nickname: None,
//!     uid: "s1".to_string(),
//!     timestamp: "2024-01-01T00:00:00Z".to_string(),
//!     readings: Readings { temperature: 21.5, humidity: 40.0, pressure: 1012.0 },
//! }).await?;
//!
//! let series = db.query(None, Some("2024-01-01T00:00:00Z"), None).await;
//! println!("{} points for {}", series.measurements.len(), series.series_id);
//! ```

mod config;
mod db;
mod downsample;
mod error;
mod keys;
mod model;
#[cfg(feature = "http-server")]
pub mod server;
mod validate;

pub use config::Config;
pub use db::{MeasurementDb, CHART_POINT_BUDGET};
pub use downsample::{downsample, DownsampleError, SeriesPoint};
pub use error::{Error, Result};
pub use keys::KeyDeriver;
pub use model::{Measurement, MeasurementReading, MeasurementSeries, Readings};
pub use validate::{validate, ReadingField, ValidMeasurement, ValidationError};
