//! In-memory table store backend.
//!
//! Backs tests and local development. Rows live in a per-partition ordered
//! map, so range queries are straight `BTreeMap` range scans.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{Row, StoreResult, TableStore};

/// In-memory [`TableStore`] implementation.
///
/// Writes with an existing (partition, sort key) pair overwrite the
/// previous row, matching the last-write-wins contract of the trait.
#[derive(Default)]
pub struct InMemoryTable {
    partitions: RwLock<HashMap<String, BTreeMap<String, Row>>>,
}

impl InMemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all partitions. Test helper.
    pub fn len(&self) -> usize {
        self.partitions
            .read()
            .unwrap()
            .values()
            .map(BTreeMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TableStore for InMemoryTable {
    async fn write(&self, row: Row) -> StoreResult<()> {
        let mut partitions = self.partitions.write().unwrap();
        partitions
            .entry(row.partition_key.clone())
            .or_default()
            .insert(row.sort_key.clone(), row);
        Ok(())
    }

    async fn query_range(
        &self,
        partition_key: &str,
        start_key: &str,
        end_key: &str,
    ) -> StoreResult<Vec<Row>> {
        // BTreeMap::range panics on an inverted range; an inverted window
        // is simply empty.
        if start_key > end_key {
            return Ok(Vec::new());
        }

        let partitions = self.partitions.read().unwrap();
        let Some(partition) = partitions.get(partition_key) else {
            return Ok(Vec::new());
        };

        let rows = partition
            .range::<str, _>((Bound::Included(start_key), Bound::Included(end_key)))
            .map(|(_, row)| row.clone())
            .collect();
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::super::FieldValue;
    use super::*;

    fn row(partition: &str, sort: &str, temperature: f64) -> Row {
        Row::new(partition, sort).with_field("temperature", FieldValue::Double(temperature))
    }

    #[tokio::test]
    async fn should_return_rows_within_inclusive_bounds() {
        // given
        let store = InMemoryTable::new();
        for (sort, temp) in [("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0)] {
            store.write(row("sensor1", sort, temp)).await.unwrap();
        }

        // when
        let rows = store.query_range("sensor1", "b", "c").await.unwrap();

        // then - both bounds are inclusive
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sort_key, "b");
        assert_eq!(rows[1].sort_key, "c");
    }

    #[tokio::test]
    async fn should_return_empty_for_unknown_partition() {
        // given
        let store = InMemoryTable::new();
        store.write(row("sensor1", "a", 1.0)).await.unwrap();

        // when
        let rows = store.query_range("sensor2", "a", "z").await.unwrap();

        // then
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn should_return_empty_for_inverted_bounds() {
        // given
        let store = InMemoryTable::new();
        for (sort, temp) in [("a", 1.0), ("b", 2.0)] {
            store.write(row("sensor1", sort, temp)).await.unwrap();
        }

        // when - start past end must not panic
        let rows = store.query_range("sensor1", "b", "a").await.unwrap();

        // then
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn should_isolate_partitions() {
        // given
        let store = InMemoryTable::new();
        store.write(row("sensor1", "a", 1.0)).await.unwrap();
        store.write(row("sensor2", "a", 2.0)).await.unwrap();

        // when
        let rows = store.query_range("sensor1", "a", "z").await.unwrap();

        // then
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].numeric("temperature"), 1.0);
    }

    #[tokio::test]
    async fn should_overwrite_row_with_same_keys() {
        // given
        let store = InMemoryTable::new();
        store.write(row("sensor1", "a", 1.0)).await.unwrap();

        // when
        store.write(row("sensor1", "a", 9.0)).await.unwrap();

        // then - last write wins, no duplicate
        let rows = store.query_range("sensor1", "a", "a").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].numeric("temperature"), 9.0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn should_tolerate_repeated_identical_writes() {
        // given
        let store = InMemoryTable::new();
        let r = row("sensor1", "a", 1.0);

        // when
        store.write(r.clone()).await.unwrap();
        store.write(r.clone()).await.unwrap();
        store.write(r).await.unwrap();

        // then
        assert_eq!(store.len(), 1);
    }
}
