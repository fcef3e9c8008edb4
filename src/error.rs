//! API error taxonomy and HTTP mapping.
//!
//! Every failure surfaces to the caller as a JSON `{"detail": message}` body
//! with a status matching the error kind. There are no retries and no
//! partial-success responses: generation either fully succeeds or fails here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors the API surface can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or unsupported request parameters.
    #[error("{0}")]
    Validation(String),

    /// Unknown religion id.
    #[error("Religion not found: {0}")]
    NotFound(String),

    /// The backend call failed or returned unusable content.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The backend returned valid JSON that is not an object.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Generation(_) => StatusCode::BAD_GATEWAY,
            Self::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_error_kinds() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Generation("boom".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Schema("not an object".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn detail_message_is_never_empty() {
        let err = ApiError::Generation("backend returned no JSON".into());
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().contains("backend returned no JSON"));
    }
}
