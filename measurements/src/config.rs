//! Configuration for the measurements service.

use common::StoreConfig;
use serde::{Deserialize, Serialize};

/// Configuration for opening a [`MeasurementDb`](crate::MeasurementDb).
///
/// The default sensor identity is deliberately explicit configuration: it
/// is the partition every unlabelled sample lands in and the series every
/// query without an override reads from, so it must not be a literal buried
/// in the code paths that use it.
///
/// # Example
///
/// ```ignore
/// use measurements::Config;
/// use common::StoreConfig;
///
/// let config = Config {
///     store: StoreConfig::InMemory,
///     table: "housemeasurements".to_string(),
///     sensor_name: "sensor1".to_string(),
/// };
/// let db = MeasurementDb::open(config).await?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Table store backend configuration.
    pub store: StoreConfig,

    /// Name of the table samples are written to.
    ///
    /// An empty table name is a configuration error: ingest rejects the
    /// request and query returns an empty series.
    pub table: String,

    /// Default sensor identity.
    ///
    /// Used as the partition key when a sample carries no nickname, and as
    /// the queried series when a request names no sensor.
    pub sensor_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            table: "housemeasurements".to_string(),
            sensor_name: "sensor1".to_string(),
        }
    }
}
