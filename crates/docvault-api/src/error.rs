//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use docvault_core::error::{AppError, ErrorKind};

/// Message returned in place of infrastructure error details.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// User-visible message for an error; infrastructure details stay in the log.
pub fn public_message(err: &AppError) -> String {
    if err.kind.is_client_error() {
        err.message.clone()
    } else {
        INTERNAL_MESSAGE.to_string()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = status_for(err.kind);

        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err, "Internal server error");
        }

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: public_message(&err),
        };

        (status, Json(body)).into_response()
    }
}
