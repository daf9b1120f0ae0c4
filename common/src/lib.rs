//! Shared infrastructure for homedata services.
//!
//! This crate provides the pieces that are independent of any particular
//! service domain:
//!
//! - [`Clock`]: a time source abstraction so services can substitute a
//!   deterministic clock under test.
//! - [`TableStore`]: the partition/sort-keyed table storage interface that
//!   services persist rows through, together with the loosely-typed
//!   [`Row`] / [`FieldValue`] record model and an in-memory backend.

pub mod clock;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use store::{FieldValue, Row, StoreConfig, StoreError, StoreResult, TableStore};
