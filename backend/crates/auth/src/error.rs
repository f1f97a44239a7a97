//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// No TOTP secret has been provisioned for the user
    #[error("Two-factor secret not found")]
    SecretNotFound,

    /// No device session exists for this (user, device) pair
    #[error("Device session not found")]
    SessionNotFound,

    /// Invalid credentials (wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// OTP code missing from the request
    #[error("OTP code is required")]
    MissingOtpCode,

    /// OTP code failed TOTP verification
    #[error("Invalid OTP code")]
    InvalidOtpCode,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound | AuthError::SecretNotFound | AuthError::SessionNotFound => {
                StatusCode::NOT_FOUND
            }
            AuthError::InvalidCredentials | AuthError::InvalidOtpCode => StatusCode::UNAUTHORIZED,
            AuthError::MissingOtpCode | AuthError::MissingHeader(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound | AuthError::SecretNotFound | AuthError::SessionNotFound => {
                ErrorKind::NotFound
            }
            AuthError::InvalidCredentials | AuthError::InvalidOtpCode => ErrorKind::Unauthorized,
            AuthError::MissingOtpCode | AuthError::MissingHeader(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError.
    ///
    /// Storage and internal failures surface a fixed public message; their
    /// detail stays in the server logs only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidOtpCode => {
                tracing::warn!("Invalid OTP code submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping_is_one_to_one_with_status() {
        let cases: Vec<AuthError> = vec![
            AuthError::UserNotFound,
            AuthError::SecretNotFound,
            AuthError::SessionNotFound,
            AuthError::InvalidCredentials,
            AuthError::MissingOtpCode,
            AuthError::InvalidOtpCode,
            AuthError::MissingHeader("User-Agent".into()),
            AuthError::Internal("boom".into()),
        ];
        for err in cases {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code());
        }
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = AuthError::Internal("connection string postgres://secret".into());
        let public = err.to_app_error();
        assert!(!public.message().contains("postgres://"));
        assert_eq!(public.message(), "Internal server error");
    }
}
