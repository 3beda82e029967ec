//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use atelier_core::error::AtelierError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<AtelierError> for ApiError {
    fn from(err: AtelierError) -> Self {
        match &err {
            AtelierError::NotBuilder => {
                ApiError::new(StatusCode::FORBIDDEN, err.to_string(), "NOT_BUILDER")
            }
            AtelierError::BuilderExists => {
                ApiError::new(StatusCode::CONFLICT, err.to_string(), "BUILDER_EXISTS")
            }
            AtelierError::AlreadyRequested => {
                ApiError::new(StatusCode::CONFLICT, err.to_string(), "ALREADY_REQUESTED")
            }
            AtelierError::NoSuchRequest => {
                ApiError::new(StatusCode::NOT_FOUND, err.to_string(), "NO_SUCH_REQUEST")
            }
            AtelierError::IndexOutOfRange { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, err.to_string(), "OUT_OF_RANGE")
            }
            AtelierError::InvalidKeyEncoding(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string(), "INVALID_KEY")
            }
            AtelierError::InvalidAddress(_) | AtelierError::HexError(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string(), "INVALID_ADDRESS")
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
