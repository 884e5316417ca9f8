/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - StoreError / CredentialError を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::credential::CredentialError;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Every failure keeps its own kind end to end; the HTTP mapping below is the
/// only place a kind is translated, and it never merges two kinds into one.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },

    #[error("not logged in")]
    Unauthenticated,

    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,

    #[error("forbidden")]
    Forbidden,

    #[error("not found: {resource}")]
    NotFound { resource: &'static str },

    #[error("email already registered")]
    DuplicateEmail,

    #[error("wrong email or password")]
    InvalidCredentials,

    #[error("already friends")]
    AlreadyFriends,

    #[error("unit \"{0}\" not supported")]
    UnsupportedUnit(String),

    #[error("malformed credential hash")]
    CredentialFormat,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::BadRequest { code, .. } => (StatusCode::BAD_REQUEST, *code),
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            AppError::SessionExpired => (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::DuplicateEmail => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AppError::AlreadyFriends => (StatusCode::CONFLICT, "ALREADY_FRIENDS"),
            AppError::UnsupportedUnit(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_UNIT"),
            AppError::CredentialFormat => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CREDENTIAL_FORMAT")
            }
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(resource) => AppError::NotFound { resource },
            StoreError::DuplicateEmail => AppError::DuplicateEmail,
            StoreError::AlreadyFriends => AppError::AlreadyFriends,
            StoreError::UnsupportedUnit(unit) => AppError::UnsupportedUnit(unit),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::Format(_) => AppError::CredentialFormat,
        }
    }
}
