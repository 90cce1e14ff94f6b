use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::{FailureKind, StoreError, StoreErrorCode};

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Human-readable error description.
    #[schema(example = "Validation failed")]
    pub error: String,
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `TOKEN_MISSING`,
    /// `TOKEN_INVALID`, `INVALID_CREDENTIALS`, `NOT_FOUND`, `EMAIL_TAKEN`,
    /// `UPLOAD_FAILED`, `INTERNAL_ERROR`, or a persistence code such as
    /// `BLOG_CREATE_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Field-level messages (`"field: message"`) for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request that is not tied to a particular field.
    Validation(String),
    /// Schema validation failure with one message per offending field.
    InvalidFields(Vec<String>),
    TokenMissing,
    TokenInvalid,
    InvalidCredentials,
    NotFound(String),
    EmailTaken,
    /// The image host rejected or could not complete an upload.
    UploadFailed(String),
    Store(StoreError),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, code, error, errors) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg, None),
            AppError::InvalidFields(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_MISSING",
                "Authentication required".into(),
                None,
            ),
            AppError::TokenInvalid => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_INVALID",
                "Invalid or expired token".into(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".into(),
                None,
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            AppError::EmailTaken => (
                StatusCode::CONFLICT,
                "EMAIL_TAKEN",
                "Email is already registered".into(),
                None,
            ),
            AppError::UploadFailed(msg) => {
                tracing::warn!("Upload failed: {}", msg);
                (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED", msg, None)
            }
            AppError::Store(err) => {
                tracing::error!(code = %err.code, "Store error: {}", err.message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.code.as_str(),
                    "An unexpected error occurred".into(),
                    None,
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected error occurred".into(),
                    None,
                )
            }
        };

        (
            status,
            ErrorBody {
                success: false,
                error,
                code,
                errors,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match (err.kind, err.code) {
            (FailureKind::Conflict, StoreErrorCode::UserCreate) => AppError::EmailTaken,
            (FailureKind::NotFound, _) => {
                tracing::debug!("{}", err);
                AppError::NotFound("Resource not found".into())
            }
            _ => AppError::Store(err),
        }
    }
}
