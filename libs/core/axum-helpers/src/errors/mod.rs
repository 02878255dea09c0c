pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error produced by [`AppError`].
///
/// ```json
/// {
///   "code": 1002,
///   "error": "INVALID_ID",
///   "message": "Invalid identifier: abc"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable identifier, see [`ErrorCode::as_str`]
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Cross-cutting HTTP errors shared by every route.
///
/// Domain crates convert their own errors into this type when they have no
/// dedicated response shape.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Path extraction error: {0}")]
    PathRejection(#[from] PathRejection),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    /// Status code and error code this error renders with.
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::PathRejection(_) | AppError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidId)
            }
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();

        let message = match self {
            AppError::PathRejection(e) => {
                tracing::info!(error_code = code.code(), "Path rejection: {}", e);
                e.body_text()
            }
            AppError::InvalidId(raw) => {
                tracing::info!(error_code = code.code(), id = %raw, "Invalid identifier");
                format!("{}: {}", code.default_message(), raw)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                msg
            }
        };

        error_response(status, message, code)
    }
}

/// Render an [`ErrorResponse`] without going through [`AppError`].
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    let body = Json(ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details: None,
    });

    (status, body).into_response()
}
