//! Loan Record
//!
//! The five fields the portal reads from the government record service.
//! Any other fields in the payload (`id`, `created_at`, ...) are ignored.

use serde::Deserialize;

use crate::error::{LoanError, LoanResult};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanRecord {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub loan_amount_requested: f64,
    pub loan_status: String,
}

impl LoanRecord {
    pub fn from_json(body: &[u8]) -> LoanResult<Self> {
        serde_json::from_slice(body).map_err(|e| LoanError::Decode(e.to_string()))
    }
}

/// Lookup key sent to the record service, built from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    first_name: String,
    last_name: String,
}

impl RecordQuery {
    /// Both names must be non-blank; a session without them is treated as expired
    pub fn from_session(first_name: &str, last_name: &str) -> LoanResult<Self> {
        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(LoanError::SessionExpired);
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Result of a validation that reached the record service
#[derive(Debug, Clone, PartialEq)]
pub enum LoanOutcome {
    Found(LoanRecord),
    /// The record service has no record for this name pair
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_extra_fields() {
        let body = br#"{
            "id": 7,
            "first_name": "Alice",
            "last_name": "Smith",
            "date_of_birth": "1990-01-01",
            "loan_amount_requested": 12345.6,
            "loan_status": "Approved",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let record = LoanRecord::from_json(body).unwrap();
        assert_eq!(record.first_name, "Alice");
        assert_eq!(record.loan_amount_requested, 12345.6);
        assert_eq!(record.loan_status, "Approved");
    }

    #[test]
    fn test_decode_rejects_missing_or_mistyped_fields() {
        assert!(matches!(
            LoanRecord::from_json(br#"{"first_name": "Alice"}"#),
            Err(LoanError::Decode(_))
        ));
        assert!(matches!(
            LoanRecord::from_json(
                br#"{"first_name":"A","last_name":"B","date_of_birth":"x","loan_amount_requested":"lots","loan_status":"Pending"}"#
            ),
            Err(LoanError::Decode(_))
        ));
        assert!(matches!(
            LoanRecord::from_json(b"<html>"),
            Err(LoanError::Decode(_))
        ));
    }

    #[test]
    fn test_query_requires_both_names() {
        assert!(RecordQuery::from_session("Alice", "Smith").is_ok());
        assert!(matches!(
            RecordQuery::from_session("", "Smith"),
            Err(LoanError::SessionExpired)
        ));
        assert!(matches!(
            RecordQuery::from_session("Alice", "  "),
            Err(LoanError::SessionExpired)
        ));
    }
}
