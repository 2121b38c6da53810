//! Custom error types for the queue service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the queue service
///
/// Every operation either fully commits or fails with one of these; there
/// are no retries and no partial application.
#[derive(Error, Debug)]
pub enum QueueError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Referenced user does not exist or has the wrong role
    #[error("{0}")]
    InvalidActor(String),

    /// Entity missing or not in the required lifecycle state. Missing and
    /// wrong-state are deliberately indistinguishable to callers.
    #[error("{0}")]
    InvalidState(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for QueueError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            QueueError::Validation(msg) | QueueError::InvalidActor(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            QueueError::Conflict(msg) | QueueError::InvalidState(msg) => {
                (StatusCode::CONFLICT, msg)
            }
            QueueError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for queue service results
pub type QueueResult<T> = Result<T, QueueError>;
