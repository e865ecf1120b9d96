//! Error types for feddit-analyzer
//!
//! Three layers:
//! - [`ClientError`]: closed set of failure kinds shared by both HTTP
//!   collaborators (Feddit API, sentiment model API)
//! - [`AnalyzerError`]: what the core operations return
//! - [`ApiError`]: HTTP handler error, mapped to a status code

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::polarity::PolarityError;

/// Collaborator (HTTP client) error kinds
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// Connection failure, timeout or unreadable body
    #[error("Network error: {0}")]
    Network(String),

    /// 400 from the collaborator
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 404 from the collaborator
    #[error("Not found: {0}")]
    NotFound(String),

    /// 500 from the collaborator
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Any other non-success status
    #[error("Unexpected error {0}: {1}")]
    Unexpected(u16, String),

    /// 200 with a body that does not match the expected schema
    #[error("Response validation error: {0}")]
    ResponseValidation(String),

    /// Collaborator reports an API version this client does not support
    #[error("Unsupported API version: {0}")]
    UnsupportedVersion(String),
}

/// Errors of the core analysis operations
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Failure talking to the Feddit API
    #[error("Feddit API error: {0}")]
    Feddit(ClientError),

    /// Failure talking to the sentiment model API
    #[error("Model API error: {0}")]
    Model(ClientError),

    /// Scorer output could not be turned into a polarity
    #[error(transparent)]
    Polarity(#[from] PolarityError),

    /// `min_time` after `max_time`
    #[error("Invalid time range: min_datetime {min} is greater than max_datetime {max}")]
    InvalidTimeRange { min: i64, max: i64 },

    /// Scorer returned a different number of results than statements sent
    #[error("Response mismatch: sent {expected} statements, received {received} results")]
    ResponseMismatch { expected: usize, received: usize },

    /// Title search exhausted the subfeddit listing
    #[error("Subfeddit with title '{0}' not found")]
    EntityNotFound(String),
}

/// Result type for core operations
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Body missing, not JSON, or not matching the request schema
    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    /// Core analysis failure
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),
}

impl ApiError {
    /// Status code and machine-readable error code
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::InvalidBody(rejection) => (rejection.status(), "INVALID_REQUEST_BODY"),
            ApiError::Analyzer(err) => match err {
                AnalyzerError::InvalidTimeRange { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_TIME_RANGE")
                }
                AnalyzerError::EntityNotFound(_) => (StatusCode::NOT_FOUND, "SUBFEDDIT_NOT_FOUND"),
                AnalyzerError::Feddit(client) => client_status(client, Upstream::Feddit),
                AnalyzerError::Model(client) => client_status(client, Upstream::Model),
                AnalyzerError::Polarity(PolarityError::InvalidPolarity(_)) => {
                    (StatusCode::BAD_REQUEST, "INVALID_POLARITY")
                }
                AnalyzerError::Polarity(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_OUTPUT_INVALID")
                }
                AnalyzerError::ResponseMismatch { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_RESPONSE_MISMATCH")
                }
            },
        }
    }
}

#[derive(Clone, Copy)]
enum Upstream {
    Feddit,
    Model,
}

fn client_status(err: &ClientError, upstream: Upstream) -> (StatusCode, &'static str) {
    use Upstream::{Feddit, Model};

    match (err, upstream) {
        (ClientError::BadRequest(_), Feddit) => (StatusCode::BAD_REQUEST, "FEDDIT_BAD_REQUEST"),
        (ClientError::BadRequest(_), Model) => (StatusCode::BAD_REQUEST, "MODEL_BAD_REQUEST"),
        (ClientError::NotFound(_), Feddit) => (StatusCode::NOT_FOUND, "FEDDIT_NOT_FOUND"),
        (ClientError::NotFound(_), Model) => (StatusCode::NOT_FOUND, "MODEL_NOT_FOUND"),
        (ClientError::UnsupportedVersion(_), Feddit) => {
            (StatusCode::BAD_REQUEST, "FEDDIT_UNSUPPORTED_VERSION")
        }
        (ClientError::UnsupportedVersion(_), Model) => {
            (StatusCode::BAD_REQUEST, "MODEL_UNSUPPORTED_VERSION")
        }
        (ClientError::Internal(_), Feddit) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "FEDDIT_INTERNAL_ERROR")
        }
        (ClientError::Internal(_), Model) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_INTERNAL_ERROR")
        }
        (ClientError::Unexpected(..), Feddit) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "FEDDIT_UNEXPECTED_ERROR")
        }
        (ClientError::Unexpected(..), Model) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_UNEXPECTED_ERROR")
        }
        (ClientError::ResponseValidation(_), Feddit) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "FEDDIT_RESPONSE_INVALID")
        }
        (ClientError::ResponseValidation(_), Model) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_RESPONSE_INVALID")
        }
        (ClientError::Network(_), Feddit) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "FEDDIT_UNAVAILABLE")
        }
        (ClientError::Network(_), Model) => (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_UNAVAILABLE"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.classify();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code = error_code, "{}", message);
        } else {
            tracing::warn!(code = error_code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds_map_to_404() {
        let (status, code) =
            ApiError::from(AnalyzerError::EntityNotFound("x".into())).classify();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "SUBFEDDIT_NOT_FOUND");

        let (status, code) =
            ApiError::from(AnalyzerError::Feddit(ClientError::NotFound("gone".into()))).classify();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "FEDDIT_NOT_FOUND");
    }

    #[test]
    fn test_service_is_distinguishable() {
        let feddit = ApiError::from(AnalyzerError::Feddit(ClientError::Internal("x".into())));
        let model = ApiError::from(AnalyzerError::Model(ClientError::Internal("x".into())));
        assert_eq!(feddit.classify().1, "FEDDIT_INTERNAL_ERROR");
        assert_eq!(model.classify().1, "MODEL_INTERNAL_ERROR");
        assert_eq!(feddit.classify().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_errors_are_client_errors() {
        let range = ApiError::from(AnalyzerError::InvalidTimeRange { min: 2, max: 1 });
        assert_eq!(range.classify().0, StatusCode::BAD_REQUEST);

        let mismatch = ApiError::from(AnalyzerError::ResponseMismatch {
            expected: 2,
            received: 1,
        });
        assert_eq!(mismatch.classify().0, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
