//! HTTP response types for the measurements server.

use serde::{Deserialize, Serialize};

/// Acknowledgement for a stored measurement.
///
/// Echoes the derived row key so the submitter can correlate or re-query
/// the exact sample it just wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub message: String,
    pub row_key: String,
}

impl IngestResponse {
    pub fn stored(row_key: String) -> Self {
        Self {
            message: "Data stored".to_string(),
            row_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_row_key_in_camel_case() {
        // given
        let response = IngestResponse::stored("2024-01-01T00:00:00.0000000Z".to_string());

        // when
        let json = serde_json::to_string(&response).unwrap();

        // then
        assert!(json.contains(r#""message":"Data stored""#));
        assert!(json.contains(r#""rowKey":"2024-01-01T00:00:00.0000000Z""#));
    }
}
