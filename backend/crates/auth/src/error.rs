//! Auth Error Types
//!
//! Status codes come from the shared `kernel::error::ErrorKind` table.
//!
//! The portal front end swaps server responses straight into the page, so
//! errors are rendered as HTML fragments rather than JSON. Only the fixed
//! user-facing message is sent; internal detail goes to the log.

use std::borrow::Cow;

use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use kernel::error::kind::ErrorKind;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Response header telling the client a login is needed
pub const AUTH_REQUIRED_HEADER: &str = "x-auth-required";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed form input
    #[error("{0}")]
    Validation(Cow<'static, str>),

    /// Username already exists
    #[error("Username already exists")]
    UsernameTaken,

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Session missing, forged, unknown or expired
    #[error("Please login to continue")]
    SessionInvalid,

    /// Password could not be hashed
    #[error("Failed to hash password")]
    PasswordHashing(#[source] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        AuthError::Validation(message.into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UsernameTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::PasswordHashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Message safe to show to the end user
    pub fn user_message(&self) -> Cow<'static, str> {
        match self {
            AuthError::Validation(message) => message.clone(),
            AuthError::Database(_) | AuthError::Internal(_) => {
                Cow::Borrowed("Something went wrong. Please try again later.")
            }
            other => Cow::Owned(other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
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

        let fragment = platform::html::error_fragment(&self.user_message());
        let mut response = (self.status_code(), Html(fragment)).into_response();

        if matches!(self, AuthError::SessionInvalid) {
            response
                .headers_mut()
                .insert(AUTH_REQUIRED_HEADER, HeaderValue::from_static("true"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AuthError::validation("All fields are required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AuthError::UsernameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AuthError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::SessionInvalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_not_shown() {
        let err = AuthError::Internal("connection reset by peer".into());
        assert!(!err.user_message().contains("connection reset"));
        assert_eq!(err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_session_invalid_response_flags_login() {
        let response = AuthError::SessionInvalid.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(AUTH_REQUIRED_HEADER).unwrap(), "true");
    }
}
