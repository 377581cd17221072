//! Transport-level error mapping. This is the only layer that turns errors
//! into status codes and user-facing text; discrimination is by kind, never
//! by message string.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::task::TaskServiceError;
use thiserror::Error;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid task id: {0}")]
    InvalidId(#[from] uuid::Error),
    #[error(transparent)]
    InvalidPayload(#[from] JsonRejection),
    #[error(transparent)]
    TaskService(#[from] TaskServiceError),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidId(_) => (StatusCode::BAD_REQUEST, "Invalid task ID format"),
            ApiError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, "Invalid request payload"),
            ApiError::TaskService(TaskServiceError::TaskNotFound) => {
                (StatusCode::NOT_FOUND, "Task not found")
            }
            ApiError::TaskService(
                TaskServiceError::InvalidTitle(_) | TaskServiceError::EmptyUpdate,
            ) => (StatusCode::BAD_REQUEST, "Invalid task data"),
            ApiError::TaskService(TaskServiceError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        // Store failures are logged with full detail but never echoed back.
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiResponse::error(message, detail))).into_response()
    }
}
