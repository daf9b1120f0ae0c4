//! Error types for the measurements service.

use thiserror::Error;

use crate::downsample::DownsampleError;
use crate::validate::ValidationError;

/// Errors surfaced by [`MeasurementDb`](crate::MeasurementDb) operations.
///
/// The ingest path surfaces every variant to the caller. The query path
/// never does: it logs and degrades to an empty series instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The submitted measurement failed validation. The caller's fault;
    /// nothing was persisted.
    #[error("invalid measurement: {0}")]
    Validation(#[from] ValidationError),

    /// The service configuration is incomplete, for example an unset
    /// table name.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Talking to the table store failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The downsampler was handed input it cannot work with.
    #[error("downsample error: {0}")]
    Downsample(#[from] DownsampleError),
}

impl From<common::StoreError> for Error {
    fn from(e: common::StoreError) -> Self {
        match e {
            common::StoreError::Unavailable(msg) => Error::StoreUnavailable(msg),
            common::StoreError::Configuration(msg) => Error::Configuration(msg),
        }
    }
}

/// Result type for measurements operations.
pub type Result<T> = std::result::Result<T, Error>;
