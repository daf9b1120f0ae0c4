//! HTTP request types for the measurements server.

use serde::Deserialize;

/// Query parameters for measurement range requests.
///
/// All parameters are optional: missing bounds widen the window to
/// everything stored, and a missing sensor falls back to the configured
/// default identity.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// Start of the time window (inclusive), parsed best-effort.
    pub start: Option<String>,
    /// End of the time window (inclusive), parsed best-effort.
    pub end: Option<String>,
    /// Sensor identity to query instead of the configured default.
    pub sensor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_empty_params() {
        // given
        let json = r#"{}"#;

        // when
        let params: QueryParams = serde_json::from_str(json).unwrap();

        // then
        assert!(params.start.is_none());
        assert!(params.end.is_none());
        assert!(params.sensor.is_none());
    }

    #[test]
    fn should_deserialize_full_params() {
        // given
        let json = r#"{
            "start": "2024-01-01T00:00:00Z",
            "end": "2024-01-02T00:00:00Z",
            "sensor": "attic"
        }"#;

        // when
        let params: QueryParams = serde_json::from_str(json).unwrap();

        // then
        assert_eq!(params.start.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(params.end.as_deref(), Some("2024-01-02T00:00:00Z"));
        assert_eq!(params.sensor.as_deref(), Some("attic"));
    }
}
