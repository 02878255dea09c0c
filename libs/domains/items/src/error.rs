use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

use crate::models::{FieldError, NotFoundBody, ValidationErrorBody};

pub const NOT_FOUND_MESSAGE: &str = "Item not found";

/// Body text for failures whose cause stays in the logs.
const INTERNAL_MESSAGE: &str = "Failed to process item request";

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(i64),

    #[error("Invalid item: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Item id {0} is already taken")]
    DuplicateKey(i64),

    #[error("Storage error during {operation}: {message}")]
    Storage {
        operation: &'static str,
        id: Option<i64>,
        message: String,
    },
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    /// Wrap a backend failure and log it with the operation and item id.
    pub fn storage(operation: &'static str, id: Option<i64>, err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        tracing::error!(
            error_code = ErrorCode::DatabaseError.code(),
            operation,
            item_id = ?id,
            error = %message,
            "Item storage failure"
        );
        ItemError::Storage {
            operation,
            id,
            message,
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        match self {
            ItemError::NotFound(id) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), item_id = id, "Item not found");
                (
                    StatusCode::NOT_FOUND,
                    Json(NotFoundBody {
                        error: NOT_FOUND_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
            ItemError::Validation(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    count = errors.len(),
                    "Rejected item payload"
                );
                (StatusCode::BAD_REQUEST, Json(ValidationErrorBody { errors })).into_response()
            }
            // Already logged where the error was raised.
            ItemError::DuplicateKey(_) | ItemError::Storage { .. } => {
                AppError::InternalServerError(INTERNAL_MESSAGE.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn render(err: ItemError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = render(ItemError::NotFound(99999999)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Item not found"}));
    }

    #[tokio::test]
    async fn test_validation_body_lists_every_error() {
        let err = ItemError::Validation(vec![
            FieldError::new("name", "Field \"name\" is required"),
            FieldError::new("price", "Field \"price\" is required"),
        ]);
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": [
                {"field": "name", "message": "Field \"name\" is required"},
                {"field": "price", "message": "Field \"price\" is required"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let err = ItemError::storage("insert", Some(42), "connection reset by peer");
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_duplicate_key_is_internal() {
        let (status, _) = render(ItemError::DuplicateKey(7)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_keeps_context() {
        let err = ItemError::storage("delete", None, "boom");
        match err {
            ItemError::Storage {
                operation,
                id,
                message,
            } => {
                assert_eq!(operation, "delete");
                assert_eq!(id, None);
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
