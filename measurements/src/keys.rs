//! Partition and sort key derivation.
//!
//! The table store range-queries by lexical comparison of sort key strings,
//! so every sort key this module produces uses one fixed-width UTC ISO-8601
//! representation with seven fractional-second digits:
//!
//! ```text
//! 2024-01-01T00:00:00.0000000Z
//! ```
//!
//! Every component is zero-padded, which makes lexical order over sort keys
//! identical to chronological order over the instants they encode. Write
//! keys and query bounds go through the same formatter, so bounds are
//! always comparable to stored keys.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use common::Clock;

use crate::validate::ValidMeasurement;

/// Timestamp formats accepted on ingest beyond RFC 3339.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// The smallest representable instant, used as the open lower query bound.
pub fn min_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .expect("year 1 is representable")
}

/// The largest representable instant, used as the open upper query bound.
pub fn max_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
        .single()
        .expect("year 9999 is representable")
        .with_nanosecond(999_999_900)
        .expect("sub-second precision is representable")
}

/// Formats an instant as a sort key.
///
/// The fraction is the instant's 100 ns ticks within the second, zero
/// padded to seven digits.
pub fn format_sort_key(instant: &DateTime<Utc>) -> String {
    format!(
        "{}.{:07}Z",
        instant.format("%Y-%m-%dT%H:%M:%S"),
        instant.timestamp_subsec_nanos() / 100
    )
}

/// Parses a timestamp best-effort.
///
/// Accepts RFC 3339 (including the sort key format itself) and a few naive
/// date-time shapes, which are interpreted as UTC. Returns `None` when
/// nothing matches; callers decide the fallback.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Numeric time coordinate of an instant: 100 ns ticks since the Unix
/// epoch. Used by the downsampler's area computation.
pub fn time_ticks(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp() * 10_000_000 + i64::from(instant.timestamp_subsec_nanos() / 100)
}

/// Derives partition and sort keys for writes and query bounds for reads.
///
/// The default sensor identity is injected at construction; so is the
/// clock, which supplies "now" for samples whose timestamp cannot be
/// parsed.
pub struct KeyDeriver {
    default_sensor: String,
    clock: Arc<dyn Clock>,
}

impl KeyDeriver {
    pub fn new(default_sensor: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            default_sensor: default_sensor.into(),
            clock,
        }
    }

    /// The configured default sensor identity.
    pub fn default_sensor(&self) -> &str {
        &self.default_sensor
    }

    /// Derives `(partition_key, sort_key)` for a validated measurement.
    ///
    /// The partition key is the trimmed nickname when present and
    /// non-blank, otherwise the default sensor identity. The sort key is
    /// the parsed timestamp, or the current instant when parsing fails.
    pub fn write_key(&self, measurement: &ValidMeasurement) -> (String, String) {
        let partition_key = match measurement.nickname() {
            Some(nickname) if !nickname.trim().is_empty() => nickname.trim().to_string(),
            _ => self.default_sensor.clone(),
        };

        let instant = parse_timestamp(measurement.timestamp())
            .unwrap_or_else(|| DateTime::<Utc>::from(self.clock.now()));

        (partition_key, format_sort_key(&instant))
    }

    /// Derives inclusive `(start_key, end_key)` sort key bounds for a
    /// query window.
    ///
    /// An absent or unparsable bound widens to the corresponding extreme
    /// instant, so a window with no usable bounds covers everything.
    pub fn query_bounds(&self, start: Option<&str>, end: Option<&str>) -> (String, String) {
        let start_instant = start.and_then(parse_timestamp).unwrap_or_else(min_instant);
        let end_instant = end.and_then(parse_timestamp).unwrap_or_else(max_instant);
        (
            format_sort_key(&start_instant),
            format_sort_key(&end_instant),
        )
    }
}
