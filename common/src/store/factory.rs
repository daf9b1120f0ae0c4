//! Store backend factory.

use std::sync::Arc;

use super::memory::InMemoryTable;
use super::{StoreConfig, StoreResult, TableStore};

/// Creates a table store from configuration.
pub async fn create_store(config: &StoreConfig) -> StoreResult<Arc<dyn TableStore>> {
    match config {
        StoreConfig::InMemory => {
            tracing::info!("Creating in-memory table store");
            Ok(Arc::new(InMemoryTable::new()))
        }
    }
}
