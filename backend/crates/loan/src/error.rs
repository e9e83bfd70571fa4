//! Loan Error Types
//!
//! Failure classes of the validation pipeline. A missing record is not an
//! error; see [`crate::domain::LoanOutcome::NotFound`].

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use kernel::error::kind::ErrorKind;
use thiserror::Error;

use crate::domain::client::TransportError;

pub type LoanResult<T> = Result<T, LoanError>;

#[derive(Debug, Error)]
pub enum LoanError {
    /// The session carries no usable name pair
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Timeout, DNS failure, refused connection or truncated body
    #[error("Cannot reach the government portal to fetch details. Please try again later.")]
    DownstreamUnreachable(#[source] TransportError),

    /// Record service answered with an unexpected status
    #[error("Error fetching data from government portal.")]
    DownstreamStatus(u16),

    /// 2xx response whose body is not a loan record
    #[error("Failed to parse response")]
    Decode(String),
}

impl LoanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoanError::SessionExpired => ErrorKind::Unauthorized,
            LoanError::DownstreamUnreachable(_) | LoanError::DownstreamStatus(_) => {
                ErrorKind::ServiceUnavailable
            }
            LoanError::Decode(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn log(&self) {
        match self {
            LoanError::SessionExpired => {
                tracing::warn!("Loan validation failed: session expired");
            }
            LoanError::DownstreamUnreachable(e) => {
                tracing::error!(error = %e, "Cannot reach government portal");
            }
            LoanError::DownstreamStatus(status) => {
                tracing::error!(status_code = status, "Error response from government portal");
            }
            LoanError::Decode(e) => {
                tracing::error!(error = %e, "Failed to parse response from government portal");
            }
        }
    }
}

impl IntoResponse for LoanError {
    fn into_response(self) -> Response {
        self.log();
        let fragment = platform::html::error_fragment(&self.to_string());
        (self.status_code(), Html(fragment)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(LoanError::SessionExpired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            LoanError::DownstreamUnreachable(TransportError::Timeout).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LoanError::DownstreamStatus(500).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LoanError::Decode("eof".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transport_detail_not_in_message() {
        let err = LoanError::DownstreamUnreachable(TransportError::Request(
            "tcp connect error: 10.0.0.1:8081".into(),
        ));
        assert!(!err.to_string().contains("10.0.0.1"));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
    }
}
