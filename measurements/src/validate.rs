//! Sample validation.
//!
//! Validation is pure and fails fast: the first violated rule is reported
//! and nothing else is inspected. Rules, in order:
//!
//! 1. The uid must be non-empty after trimming.
//! 2. Each of temperature, humidity, and pressure must be non-zero.
//!
//! The zero rule is a domain policy, not a bug: the submitting sensors
//! report exactly 0 when a probe is absent or failed, so an exact-zero
//! reading is interpreted as "missing sensor data" rather than a
//! legitimate measurement of zero. Revisiting this conflates the two and
//! changes acceptance semantics.

use std::fmt;

use thiserror::Error;

use crate::model::Measurement;

/// The reading field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Temperature,
    Humidity,
    Pressure,
}

impl fmt::Display for ReadingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingField::Temperature => write!(f, "temperature"),
            ReadingField::Humidity => write!(f, "humidity"),
            ReadingField::Pressure => write!(f, "pressure"),
        }
    }
}

/// A rejected measurement, naming the rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("uid must be non-empty")]
    MissingUid,

    #[error("{0} reading is zero, which is treated as missing sensor data")]
    ZeroReading(ReadingField),
}

/// A measurement that passed validation.
///
/// Constructible only through [`validate`], so downstream code can rely on
/// the invariants without rechecking them.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidMeasurement {
    inner: Measurement,
}

impl ValidMeasurement {
    pub fn nickname(&self) -> Option<&str> {
        self.inner.nickname.as_deref()
    }

    pub fn uid(&self) -> &str {
        &self.inner.uid
    }

    pub fn timestamp(&self) -> &str {
        &self.inner.timestamp
    }

    pub fn readings(&self) -> &crate::model::Readings {
        &self.inner.readings
    }
}

/// Validates a submitted measurement.
pub fn validate(measurement: Measurement) -> Result<ValidMeasurement, ValidationError> {
    if measurement.uid.trim().is_empty() {
        return Err(ValidationError::MissingUid);
    }
    if measurement.readings.temperature == 0.0 {
        return Err(ValidationError::ZeroReading(ReadingField::Temperature));
    }
    if measurement.readings.humidity == 0.0 {
        return Err(ValidationError::ZeroReading(ReadingField::Humidity));
    }
    if measurement.readings.pressure == 0.0 {
        return Err(ValidationError::ZeroReading(ReadingField::Pressure));
    }
    Ok(ValidMeasurement { inner: measurement })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Readings;

    fn measurement(uid: &str, temperature: f64, humidity: f64, pressure: f64) -> Measurement {
        Measurement {
            nickname: None,
            uid: uid.to_string(),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            readings: Readings {
                temperature,
                humidity,
                pressure,
            },
        }
    }

    #[test]
    fn should_accept_valid_measurement() {
        // given
        let m = measurement("s1", 21.5, 40.0, 1012.0);

        // when
        let valid = validate(m).unwrap();

        // then
        assert_eq!(valid.uid(), "s1");
        assert_eq!(valid.readings().pressure, 1012.0);
    }

    #[test]
    fn should_reject_empty_uid() {
        // given
        let m = measurement("", 21.5, 40.0, 1012.0);

        // when/then
        assert_eq!(validate(m).unwrap_err(), ValidationError::MissingUid);
    }

    #[test]
    fn should_reject_whitespace_uid() {
        // given
        let m = measurement("   ", 21.5, 40.0, 1012.0);

        // when/then
        assert_eq!(validate(m).unwrap_err(), ValidationError::MissingUid);
    }

    #[test]
    fn should_reject_zero_temperature() {
        // given
        let m = measurement("s1", 0.0, 40.0, 1012.0);

        // when/then
        assert_eq!(
            validate(m).unwrap_err(),
            ValidationError::ZeroReading(ReadingField::Temperature)
        );
    }

    #[test]
    fn should_reject_zero_humidity() {
        // given
        let m = measurement("s1", 21.5, 0.0, 1012.0);

        // when/then
        assert_eq!(
            validate(m).unwrap_err(),
            ValidationError::ZeroReading(ReadingField::Humidity)
        );
    }

    #[test]
    fn should_reject_zero_pressure() {
        // given
        let m = measurement("s1", 21.5, 40.0, 0.0);

        // when/then
        assert_eq!(
            validate(m).unwrap_err(),
            ValidationError::ZeroReading(ReadingField::Pressure)
        );
    }

    #[test]
    fn should_report_first_violated_rule() {
        // given - both uid and temperature invalid
        let m = measurement("", 0.0, 40.0, 1012.0);

        // when/then - uid rule is checked first
        assert_eq!(validate(m).unwrap_err(), ValidationError::MissingUid);
    }

    #[test]
    fn should_accept_negative_readings() {
        // given - below-freezing temperature is legitimate
        let m = measurement("s1", -12.5, 40.0, 1012.0);

        // when/then
        assert!(validate(m).is_ok());
    }
}
