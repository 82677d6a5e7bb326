use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::accounts::AccountError;
use crate::scheduler::AlarmError;
use crate::storage::StorageError;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Username atau Password salah. Silakan coba lagi.";
pub const DUPLICATE_USERNAME_MESSAGE: &str = "Username sudah digunakan.";
pub const DIAGNOSIS_FAILED_MESSAGE: &str =
    "Gagal menganalisis gambar. Pastikan koneksi internet stabil dan coba lagi.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Diagnosis failed: {0}")]
    Diagnosis(String),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateUsername(username) => AppError::DuplicateUsername(username),
            AccountError::Validation(msg) => AppError::Validation(msg),
            AccountError::Storage(e) => AppError::Storage(e),
        }
    }
}

impl From<AlarmError> for AppError {
    fn from(err: AlarmError) -> Self {
        match err {
            AlarmError::Validation(msg) => AppError::Validation(msg),
            AlarmError::Storage(e) => AppError::Storage(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedMedia(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                INVALID_CREDENTIALS_MESSAGE.to_string(),
            ),
            AppError::DuplicateUsername(_) => (
                StatusCode::CONFLICT,
                "DUPLICATE_USERNAME",
                DUPLICATE_USERNAME_MESSAGE.to_string(),
            ),
            AppError::Storage(StorageError::Corrupt { key, source }) => {
                tracing::error!("Corrupt stored document '{key}': {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_CORRUPT",
                    format!("Stored data under '{key}' is malformed"),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Diagnosis(msg) => {
                tracing::error!("Diagnosis error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "DIAGNOSIS_FAILED",
                    DIAGNOSIS_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
