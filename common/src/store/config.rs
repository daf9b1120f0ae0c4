//! Store configuration types.
//!
//! Services select their storage backend through [`StoreConfig`], typically
//! deserialized from a YAML config file or built directly in tests.

use serde::{Deserialize, Serialize};

/// Top-level store configuration.
///
/// A driver for an external managed table service would slot in here as a
/// further variant; the trait boundary in [`crate::store::TableStore`] is
/// the integration point.
#[derive(Default, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StoreConfig {
    /// In-memory table store. Data does not survive a restart.
    #[default]
    InMemory,
}
