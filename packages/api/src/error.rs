// ABOUTME: API error type and its HTTP rendering
// ABOUTME: Maps validation, missing-record and storage failures to status codes with a request id

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use todo_core::ValidationError;
use todo_storage::StorageError;

/// Error type returned by every handler
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error")]
    Storage(#[from] StorageError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Structured error response format for API consistency
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: ErrorDetail,
    request_id: String,
}

/// Error detail structure with machine-readable codes
#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl AppError {
    /// Convert AppError to appropriate HTTP status code and error code
    pub fn to_status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                StorageError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                StorageError::Timeout(_) => (StatusCode::SERVICE_UNAVAILABLE, "TIMEOUT"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            },
        }
    }

    /// Get user-friendly error message (sanitized for external consumption)
    fn to_user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("Validation failed: {}", msg),
            AppError::Storage(storage_error) => match storage_error {
                StorageError::Validation(err) => format!("Validation failed: {}", err),
                StorageError::NotFound => "The requested resource was not found".to_string(),
                StorageError::Timeout(_) => {
                    "The database did not answer in time. Please try again later".to_string()
                }
                _ => "Data storage error".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status_code, error_code) = self.to_status_and_code();
        let user_message = self.to_user_message();

        // Log storage failures with full context but don't expose details
        if let AppError::Storage(storage_error) = &self {
            match storage_error {
                StorageError::Timeout(elapsed) => {
                    warn!(
                        request_id = %request_id,
                        timeout = ?elapsed,
                        "Storage operation timed out"
                    );
                }
                StorageError::Validation(_) | StorageError::NotFound => {}
                other => {
                    error!(
                        request_id = %request_id,
                        storage_error = %other,
                        "Storage system error"
                    );
                }
            }
        }

        let body = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: user_message,
            },
            request_id,
        };

        (status_code, Json(body)).into_response()
    }
}
