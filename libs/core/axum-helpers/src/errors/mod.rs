pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
///
/// ```json
/// { "detail": "Product not found with filter: 1e4f214e-85f7-461a-89d0-a751a32e3bb9" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// The variant picks the status code; the payload becomes `detail`, except
/// for server-side failures where the payload is logged and a generic
/// message is returned instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Path segment that should have been a UUID
    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_) | AppError::QueryExtractorRejection(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest(_) | AppError::InvalidUuid(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, code) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidPayload.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                (e.body_text(), ErrorCode::InvalidPayload)
            }
            AppError::QueryExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidPayload.code(),
                    "Query extraction error: {}",
                    e.body_text()
                );
                (e.body_text(), ErrorCode::InvalidPayload)
            }
            AppError::BadRequest(msg) => {
                tracing::warn!(error_code = ErrorCode::ValidationError.code(), "Bad request: {}", msg);
                (msg, ErrorCode::ValidationError)
            }
            AppError::InvalidUuid(raw) => {
                tracing::warn!(error_code = ErrorCode::InvalidUuid.code(), "Invalid UUID: {}", raw);
                (format!("Invalid UUID: {}", raw), ErrorCode::InvalidUuid)
            }
            AppError::NotFound(msg) => {
                tracing::debug!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (msg, ErrorCode::NotFound)
            }
            AppError::Database(msg) => {
                tracing::error!(error_code = ErrorCode::DatabaseError.code(), "Database error: {}", msg);
                (
                    ErrorCode::DatabaseError.default_message().to_string(),
                    ErrorCode::DatabaseError,
                )
            }
        };

        tracing::trace!(error = %code, status = %status, "Returning error response");
        error_response(status, message)
    }
}

/// Build a `{"detail": ...}` response with the given status.
///
/// ```rust,ignore
/// use axum_helpers::errors::error_response;
/// use axum::http::StatusCode;
///
/// let response = error_response(StatusCode::BAD_REQUEST, "Invalid input");
/// ```
pub fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(detail))).into_response()
}
