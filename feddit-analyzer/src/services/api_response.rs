//! Shared HTTP response handling for the collaborator clients
//!
//! Both external APIs report failures through status codes only. Each
//! status is mapped onto a [`ClientError`] kind so callers can match on
//! the kind rather than on status numbers.

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Decode a successful response or map its status to an error kind
pub async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), url = %response.url(), "Response received");

    if status == StatusCode::OK {
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        return parse_body(&body);
    }

    let text = response.text().await.unwrap_or_default();
    Err(status_error(status, text))
}

/// Parse a 200 body against the expected schema
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|e| {
        ClientError::ResponseValidation(format!(
            "Response does not match the expected schema: {}",
            e
        ))
    })
}

/// Error kind for a non-200 status
pub fn status_error(status: StatusCode, body: String) -> ClientError {
    match status {
        StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        StatusCode::INTERNAL_SERVER_ERROR => ClientError::Internal(body),
        other => ClientError::Unexpected(other.as_u16(), body),
    }
}

/// Error kind for a request that never produced a response
pub fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Network(format!("Request timed out: {}", err))
    } else {
        ClientError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Version {
        version: String,
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, "bad".into()),
            ClientError::BadRequest("bad".into())
        );
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "gone".into()),
            ClientError::NotFound("gone".into())
        );
        assert_eq!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, "boom".into()),
            ClientError::Internal("boom".into())
        );
        assert_eq!(
            status_error(StatusCode::SERVICE_UNAVAILABLE, "loading".into()),
            ClientError::Unexpected(503, "loading".into())
        );
        assert_eq!(
            status_error(StatusCode::UNPROCESSABLE_ENTITY, String::new()),
            ClientError::Unexpected(422, String::new())
        );
    }

    #[test]
    fn test_parse_body_valid() {
        let parsed: Version = parse_body(br#"{"version": "0.1.0"}"#).unwrap();
        assert_eq!(parsed.version, "0.1.0");
    }

    #[test]
    fn test_parse_body_schema_mismatch() {
        let parsed: Result<Version, _> = parse_body(br#"{"name": "feddit"}"#);
        assert!(matches!(parsed, Err(ClientError::ResponseValidation(_))));

        let parsed: Result<Version, _> = parse_body(b"not json");
        assert!(matches!(parsed, Err(ClientError::ResponseValidation(_))));
    }
}
