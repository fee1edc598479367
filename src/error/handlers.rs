//! Error handlers
//!
//! Maps gateway errors onto HTTP status codes and JSON error bodies.

use axum::Json;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use serde_json::json;

use crate::error::types::GatewayError;

/// Convert error to HTTP status code
pub fn error_to_status(err: &GatewayError) -> StatusCode {
    match err {
        GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
        GatewayError::PathTraversal(_) => StatusCode::BAD_REQUEST,
        GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
        GatewayError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        GatewayError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = error_to_status(&self);
        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<BytesRejection> for GatewayError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return GatewayError::PayloadTooLarge;
        }
        warn!("Failed to read request body: {}", rejection.body_text());
        GatewayError::Validation("Unreadable request body".into())
    }
}

impl From<QueryRejection> for GatewayError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        GatewayError::Validation("Invalid query string".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_to_status() {
        assert_eq!(
            error_to_status(&GatewayError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status(&GatewayError::PathTraversal("..".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status(&GatewayError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status(&GatewayError::Io("Write failed".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status(&GatewayError::PayloadTooLarge),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[tokio::test]
    async fn test_error_body_is_json_envelope() {
        let response = GatewayError::Io("Delete failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Delete failed" }));
    }
}
