//! The [`MeasurementDb`] orchestrator: ingest and range query over the
//! table store.

use std::sync::Arc;

use common::store::factory::create_store;
use common::{Clock, FieldValue, Row, SystemClock, TableStore};

use crate::config::Config;
use crate::downsample::downsample;
use crate::error::{Error, Result};
use crate::keys::KeyDeriver;
use crate::model::{Measurement, MeasurementReading, MeasurementSeries};
use crate::validate::validate;

/// Maximum number of points a query returns.
///
/// Result sets above this are run through the LTTB downsampler; a chart
/// gains nothing from more points than it has pixels.
pub const CHART_POINT_BUDGET: usize = 500;

/// Row field names as stored in the table.
const FIELD_TEMPERATURE: &str = "temperature";
const FIELD_HUMIDITY: &str = "humidity";
const FIELD_PRESSURE: &str = "pressure";
const FIELD_UID: &str = "uid";

/// The main entry point for ingesting and querying measurements.
///
/// Each request is handled independently; the only shared state is the
/// table store behind the adapter. Validation, key derivation, and
/// downsampling are pure synchronous computations, so the store calls are
/// the only suspension points.
///
/// # Error Policy
///
/// [`ingest`](MeasurementDb::ingest) surfaces every failure to the caller,
/// distinguishing validation, configuration, and store errors.
/// [`query`](MeasurementDb::query) never fails: any internal error is
/// logged and degraded to an empty series, because the consuming dashboard
/// tolerates an empty chart but not a broken page.
pub struct MeasurementDb {
    store: Arc<dyn TableStore>,
    keys: KeyDeriver,
    table: String,
}

impl MeasurementDb {
    /// Opens a measurement database with the given configuration.
    pub async fn open(config: Config) -> Result<Self> {
        let store = create_store(&config.store).await?;
        Ok(Self::with_store(config, store, Arc::new(SystemClock)))
    }

    /// Builds a measurement database over an existing store and clock.
    ///
    /// Lets callers supply their own [`TableStore`] implementation or a
    /// deterministic clock.
    pub fn with_store(config: Config, store: Arc<dyn TableStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            keys: KeyDeriver::new(config.sensor_name, clock),
            table: config.table,
        }
    }

    /// The configured default sensor identity.
    pub fn default_sensor(&self) -> &str {
        self.keys.default_sensor()
    }

    /// Validates and persists one measurement.
    ///
    /// Returns the derived sort key on success. Nothing is written when
    /// validation or configuration checks fail.
    pub async fn ingest(&self, measurement: Measurement) -> Result<String> {
        tracing::debug!("Ingest enter");

        self.check_table()?;

        let valid = match validate(measurement) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Rejected measurement: {}", e);
                return Err(e.into());
            }
        };

        let (partition_key, sort_key) = self.keys.write_key(&valid);
        let readings = valid.readings();
        let row = Row::new(partition_key.clone(), sort_key.clone())
            .with_field(FIELD_TEMPERATURE, FieldValue::Double(readings.temperature))
            .with_field(FIELD_HUMIDITY, FieldValue::Double(readings.humidity))
            .with_field(FIELD_PRESSURE, FieldValue::Double(readings.pressure))
            .with_field(FIELD_UID, FieldValue::Text(valid.uid().to_string()));

        self.store.write(row).await?;

        tracing::info!(
            table = %self.table,
            partition_key = %partition_key,
            sort_key = %sort_key,
            "Measurement stored"
        );
        Ok(sort_key)
    }

    /// Answers a time-window query for a sensor's series.
    ///
    /// `sensor` defaults to the configured sensor identity; `start` and
    /// `end` are parsed best-effort, widening to the representable
    /// extremes when absent or unparsable. The result is chronologically
    /// ascending and holds at most [`CHART_POINT_BUDGET`] points.
    pub async fn query(
        &self,
        sensor: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> MeasurementSeries {
        let series_id = sensor.unwrap_or_else(|| self.keys.default_sensor());

        match self.query_inner(series_id, start, end).await {
            Ok(measurements) => MeasurementSeries {
                series_id: series_id.to_string(),
                measurements,
            },
            Err(e) => {
                tracing::warn!(series_id = %series_id, "Query degraded to empty series: {}", e);
                MeasurementSeries::empty(series_id)
            }
        }
    }

    async fn query_inner(
        &self,
        series_id: &str,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<MeasurementReading>> {
        self.check_table()?;

        let (start_key, end_key) = self.keys.query_bounds(start, end);
        let rows = self
            .store
            .query_range(series_id, &start_key, &end_key)
            .await?;

        let scanned = rows.len();
        let mut readings: Vec<MeasurementReading> = rows
            .into_iter()
            .map(|row| MeasurementReading {
                time_key: row.sort_key.clone(),
                temperature: row.numeric(FIELD_TEMPERATURE),
                humidity: row.numeric(FIELD_HUMIDITY),
                pressure: row.numeric(FIELD_PRESSURE),
            })
            .collect();

        // The store promises inclusion within the bounds, not ordering.
        // Sort keys are fixed-width, so lexical order is chronological.
        readings.sort_by(|a, b| a.time_key.cmp(&b.time_key));

        if readings.len() > CHART_POINT_BUDGET {
            readings = downsample(&readings, CHART_POINT_BUDGET)?;
            // Bucket selection emits in input order, but the ordering of
            // the final response is a contract, not an accident.
            readings.sort_by(|a, b| a.time_key.cmp(&b.time_key));
        }

        tracing::debug!(
            series_id = %series_id,
            scanned,
            returned = readings.len(),
            "Query complete"
        );
        Ok(readings)
    }

    fn check_table(&self) -> Result<()> {
        if self.table.trim().is_empty() {
            return Err(Error::Configuration(
                "table name is not configured".to_string(),
            ));
        }
        Ok(())
    }
}
