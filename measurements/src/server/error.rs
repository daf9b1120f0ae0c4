//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::Error;

/// Error body returned for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper turning domain errors into HTTP responses.
///
/// Validation and configuration failures are the client's to fix and map
/// to 400; store and downsampling failures are ours and map to 500. The
/// query path never produces an `ApiError`, it degrades instead.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            Error::Validation(_) | Error::Configuration(_) => StatusCode::BAD_REQUEST,
            Error::StoreUnavailable(_) | Error::Downsample(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downsample::DownsampleError;
    use crate::validate::ValidationError;

    #[test]
    fn should_map_validation_error_to_bad_request() {
        // given
        let error = ApiError::from(Error::Validation(ValidationError::MissingUid));

        // when/then
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_configuration_error_to_bad_request() {
        // given
        let error = ApiError::from(Error::Configuration("table name is not configured".into()));

        // when/then
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_map_store_failure_to_internal_error() {
        // given
        let error = ApiError::from(Error::StoreUnavailable("connection refused".into()));

        // when/then
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn should_map_downsample_failure_to_internal_error() {
        // given
        let error = ApiError::from(Error::Downsample(DownsampleError::Threshold(1)));

        // when/then
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
