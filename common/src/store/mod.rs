//! Partition/sort-keyed table storage.
//!
//! This module defines the storage interface homedata services persist rows
//! through. A [`Row`] belongs to a partition (one logical series) and is
//! ordered within that partition by its sort key. The backing store is only
//! required to answer lexical range queries over sort keys; callers must not
//! assume the rows come back in any particular order.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

pub mod config;
pub mod factory;
pub mod memory;

pub use config::StoreConfig;
pub use factory::create_store;
pub use memory::InMemoryTable;

/// Errors surfaced by table store operations.
///
/// The store does not retry internally. Retry policy, if any, belongs to
/// the caller or the transport in front of it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or the operation failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store configuration is invalid or incomplete.
    #[error("invalid store configuration: {0}")]
    Configuration(String),
}

/// Result type for table store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A loosely-typed row field value.
///
/// External table services hand back whatever numeric representation the
/// writer happened to use, so the value model admits several. Numeric
/// coercion is confined to [`FieldValue::as_f64`]; everything above the
/// adapter works with `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Double(f64),
    Float(f32),
    Int(i32),
    Long(i64),
    Text(String),
    Bool(bool),
}

impl FieldValue {
    /// Coerces the value to `f64`.
    ///
    /// Non-numeric variants coerce to 0.0, matching the treatment of a
    /// missing field. See [`Row::numeric`].
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Double(d) => *d,
            FieldValue::Float(f) => f64::from(*f),
            FieldValue::Int(i) => f64::from(*i),
            FieldValue::Long(l) => *l as f64,
            FieldValue::Text(_) | FieldValue::Bool(_) => 0.0,
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// A single stored row: partition key, sort key, and named field values.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Identifies the logical series this row belongs to.
    pub partition_key: String,
    /// Orders the row within its partition. Lexical order over sort keys
    /// must agree with the caller's intended ordering.
    pub sort_key: String,
    /// Named field values.
    pub fields: HashMap<String, FieldValue>,
}

impl Row {
    /// Creates a row with no fields.
    pub fn new(partition_key: impl Into<String>, sort_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            sort_key: sort_key.into(),
            fields: HashMap::new(),
        }
    }

    /// Adds a field, builder-style.
    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Reads a field as `f64`, coercing loosely-typed values.
    ///
    /// Returns 0.0 when the field is missing or not numeric.
    pub fn numeric(&self, name: &str) -> f64 {
        self.fields.get(name).map(FieldValue::as_f64).unwrap_or(0.0)
    }

    /// Reads a field as text. Returns `None` when missing or non-text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(FieldValue::as_text)
    }
}

/// Interface to a partition/sort-keyed table store.
///
/// Implementations own all persisted state. Rows are immutable once
/// written; writing the same partition and sort key again overwrites the
/// previous row (last write wins).
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Upserts a single row.
    ///
    /// Repeated identical writes must not corrupt state.
    async fn write(&self, row: Row) -> StoreResult<()>;

    /// Returns the rows of a partition whose sort keys fall lexically
    /// within `[start_key, end_key]`, both bounds inclusive. A start key
    /// greater than the end key denotes an empty window, not an error.
    ///
    /// The result carries no ordering guarantee; callers sort.
    async fn query_range(
        &self,
        partition_key: &str,
        start_key: &str,
        end_key: &str,
    ) -> StoreResult<Vec<Row>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_coerce_numeric_variants_to_f64() {
        // given/when/then
        assert_eq!(FieldValue::Double(21.5).as_f64(), 21.5);
        assert_eq!(FieldValue::Float(2.5).as_f64(), 2.5);
        assert_eq!(FieldValue::Int(7).as_f64(), 7.0);
        assert_eq!(FieldValue::Long(1012).as_f64(), 1012.0);
    }

    #[test]
    fn should_coerce_non_numeric_variants_to_zero() {
        // given/when/then
        assert_eq!(FieldValue::Text("21.5".to_string()).as_f64(), 0.0);
        assert_eq!(FieldValue::Bool(true).as_f64(), 0.0);
    }

    #[test]
    fn should_default_missing_field_to_zero() {
        // given
        let row = Row::new("sensor1", "2024-01-01T00:00:00.0000000Z")
            .with_field("temperature", FieldValue::Double(21.5));

        // when/then
        assert_eq!(row.numeric("temperature"), 21.5);
        assert_eq!(row.numeric("humidity"), 0.0);
    }

    #[test]
    fn should_read_text_field() {
        // given
        let row = Row::new("sensor1", "2024-01-01T00:00:00.0000000Z")
            .with_field("uid", FieldValue::Text("s1".to_string()))
            .with_field("pressure", FieldValue::Double(1012.0));

        // when/then
        assert_eq!(row.text("uid"), Some("s1"));
        assert_eq!(row.text("pressure"), None);
        assert_eq!(row.text("missing"), None);
    }
}
