//! Record Service Error Types
//!
//! Errors leave the service as RFC 7807 problem documents built by
//! `kernel::error::app_error::AppError`, with the request's trace id as
//! `instance`.

use std::borrow::Cow;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::telemetry::TraceContext;
use thiserror::Error;

use crate::domain::customer::CustomerId;

pub type RecordResult<T> = Result<T, RecordError>;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("first_name and last_name query parameters are required")]
    MissingName,

    #[error("Invalid input: {0}")]
    InvalidInput(Cow<'static, str>),

    #[error("Invalid loan status. Must be one of: Approved, Pending, Rejected, Under Review, Disbursed")]
    InvalidStatus,

    #[error("Customer not found")]
    NotFound,

    #[error("Customer already exists with this name")]
    AlreadyExists(CustomerId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored row does not map onto the domain
    #[error("Corrupt customer row: {0}")]
    CorruptRow(String),
}

impl RecordError {
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        RecordError::InvalidInput(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::MissingName | RecordError::InvalidInput(_) | RecordError::InvalidStatus => {
                ErrorKind::BadRequest
            }
            RecordError::NotFound => ErrorKind::NotFound,
            RecordError::AlreadyExists(_) => ErrorKind::Conflict,
            RecordError::Database(_) | RecordError::CorruptRow(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    fn log(&self) {
        match self {
            RecordError::Database(e) => tracing::error!(error = %e, "Record database error"),
            RecordError::CorruptRow(detail) => {
                tracing::error!(detail = %detail, "Corrupt customer row")
            }
            RecordError::AlreadyExists(existing_id) => {
                tracing::info!(existing_id, "Customer already exists")
            }
            _ => tracing::debug!(error = %self, "Record request rejected"),
        }
    }

    /// Log and convert into the problem document for one request
    pub fn into_problem(self, trace: &TraceContext) -> AppError {
        self.log();

        let app_error = match self {
            RecordError::Database(e) => AppError::from(e),
            RecordError::CorruptRow(_) => AppError::internal("Failed to read customer record"),
            other => AppError::new(other.kind(), other.to_string()),
        };
        app_error.with_instance(trace.trace_id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(RecordError::MissingName.status_code(), 400);
        assert_eq!(RecordError::InvalidStatus.status_code(), 400);
        assert_eq!(RecordError::invalid_input("x").status_code(), 400);
        assert_eq!(RecordError::NotFound.status_code(), 404);
        assert_eq!(RecordError::AlreadyExists(3).status_code(), 409);
        assert_eq!(RecordError::CorruptRow("x".into()).status_code(), 500);
    }

    #[test]
    fn test_problem_carries_trace_id() {
        let trace = TraceContext::generate();
        let problem = RecordError::NotFound.into_problem(&trace);

        assert_eq!(problem.status_code(), 404);
        assert_eq!(problem.message(), "Customer not found");
        assert_eq!(problem.instance(), Some(trace.trace_id().to_string().as_str()));
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let problem = RecordError::CorruptRow("loan_status='Lost'".into())
            .into_problem(&TraceContext::generate());
        assert!(!problem.message().contains("Lost"));
    }
}
