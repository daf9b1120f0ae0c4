//! Core data types for the measurements service.

use serde::{Deserialize, Serialize};

use crate::downsample::SeriesPoint;
use crate::keys;

/// A sensor sample submitted for ingestion.
///
/// The timestamp is free-form and parsed best-effort; samples with an
/// unparsable timestamp are stamped with the current instant rather than
/// rejected. Validation of the other fields happens in
/// [`validate`](crate::validate()).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Optional display name of the submitting sensor. When present (and
    /// non-blank) it becomes the partition key for the sample.
    #[serde(default, alias = "seriesLabel")]
    pub nickname: Option<String>,

    /// Unique identifier of the submitting device.
    pub uid: String,

    /// Sample timestamp as supplied by the device.
    pub timestamp: String,

    /// The three sensor readings.
    pub readings: Readings,
}

/// The three readings carried by every sample.
///
/// A reading of exactly zero is treated as missing sensor data, not as a
/// legitimate zero measurement. This is a domain policy the validator
/// enforces; see [`ValidationError`](crate::ValidationError).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Readings {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

/// One point of a query result.
///
/// `time_key` is the stored sort key, a fixed-width UTC ISO-8601 timestamp,
/// so sorting readings by `time_key` sorts them chronologically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementReading {
    pub time_key: String,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl SeriesPoint for MeasurementReading {
    fn time_coord(&self) -> Option<f64> {
        keys::parse_timestamp(&self.time_key).map(|dt| keys::time_ticks(&dt) as f64)
    }

    fn value_coord(&self) -> f64 {
        (self.temperature + self.humidity + self.pressure) / 3.0
    }
}

/// A query response: the queried series and its (possibly downsampled)
/// readings in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSeries {
    pub series_id: String,
    pub measurements: Vec<MeasurementReading>,
}

impl MeasurementSeries {
    /// An empty series for the given identity. The degraded-read result.
    pub fn empty(series_id: impl Into<String>) -> Self {
        Self {
            series_id: series_id.into(),
            measurements: Vec::new(),
        }
    }
}
