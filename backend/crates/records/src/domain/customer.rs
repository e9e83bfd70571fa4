//! Customer Record
//!
//! A customer's loan application as held by the government record service.
//! The JSON shape of [`Customer`] is what the portal's gateway decodes, so
//! field names and the textual loan status must stay as they are.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Customer identifier (database sequence)
pub type CustomerId = i64;

/// Loan application status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Approved,
    Pending,
    Rejected,
    #[serde(rename = "Under Review")]
    UnderReview,
    Disbursed,
}

impl LoanStatus {
    pub const ALL: [LoanStatus; 5] = [
        LoanStatus::Approved,
        LoanStatus::Pending,
        LoanStatus::Rejected,
        LoanStatus::UnderReview,
        LoanStatus::Disbursed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Approved => "Approved",
            LoanStatus::Pending => "Pending",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::UnderReview => "Under Review",
            LoanStatus::Disbursed => "Disbursed",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match on the display form
impl FromStr for LoanStatus {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LoanStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(RecordError::InvalidStatus)
    }
}

/// Stored customer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub loan_amount_requested: f64,
    pub loan_status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Case-insensitive match on both names
    pub fn has_name(&self, first_name: &str, last_name: &str) -> bool {
        self.first_name.to_lowercase() == first_name.to_lowercase()
            && self.last_name.to_lowercase() == last_name.to_lowercase()
    }
}

/// Validated customer waiting to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    first_name: String,
    last_name: String,
    date_of_birth: String,
    loan_amount_requested: f64,
    loan_status: LoanStatus,
}

impl NewCustomer {
    pub fn new(
        first_name: &str,
        last_name: &str,
        date_of_birth: &str,
        loan_amount_requested: f64,
        loan_status: &str,
    ) -> Result<Self, RecordError> {
        let first_name = required("first_name", first_name)?;
        let last_name = required("last_name", last_name)?;
        let date_of_birth = required("date_of_birth", date_of_birth)?;

        if !loan_amount_requested.is_finite() || loan_amount_requested <= 0.0 {
            return Err(RecordError::invalid_input(
                "loan_amount_requested must be a positive number",
            ));
        }

        Ok(Self {
            first_name,
            last_name,
            date_of_birth,
            loan_amount_requested,
            loan_status: loan_status.parse()?,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    pub fn loan_amount_requested(&self) -> f64 {
        self.loan_amount_requested
    }

    pub fn loan_status(&self) -> LoanStatus {
        self.loan_status
    }

    /// Assign storage identity
    pub fn into_customer(self, id: CustomerId, created_at: DateTime<Utc>) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            loan_amount_requested: self.loan_amount_requested,
            loan_status: self.loan_status,
            created_at,
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String, RecordError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RecordError::invalid_input(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_exact() {
        assert_eq!("Under Review".parse::<LoanStatus>().unwrap(), LoanStatus::UnderReview);
        assert_eq!("Approved".parse::<LoanStatus>().unwrap(), LoanStatus::Approved);
        assert!(matches!(
            "approved".parse::<LoanStatus>(),
            Err(RecordError::InvalidStatus)
        ));
        assert!("UnderReview".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_display_text() {
        assert_eq!(
            serde_json::to_string(&LoanStatus::UnderReview).unwrap(),
            r#""Under Review""#
        );
        for status in LoanStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
    }

    #[test]
    fn test_new_customer_validation() {
        let customer = NewCustomer::new(" Alice ", "Smith", "1990-01-01", 5000.0, "Pending").unwrap();
        assert_eq!(customer.first_name(), "Alice");
        assert_eq!(customer.loan_status(), LoanStatus::Pending);

        assert!(matches!(
            NewCustomer::new("", "Smith", "1990-01-01", 5000.0, "Pending"),
            Err(RecordError::InvalidInput(_))
        ));
        assert!(matches!(
            NewCustomer::new("Alice", "Smith", "1990-01-01", 0.0, "Pending"),
            Err(RecordError::InvalidInput(_))
        ));
        assert!(matches!(
            NewCustomer::new("Alice", "Smith", "1990-01-01", f64::NAN, "Pending"),
            Err(RecordError::InvalidInput(_))
        ));
        assert!(matches!(
            NewCustomer::new("Alice", "Smith", "1990-01-01", 5000.0, "Lost"),
            Err(RecordError::InvalidStatus)
        ));
    }

    #[test]
    fn test_wire_shape() {
        let customer = NewCustomer::new("Alice", "Smith", "1990-01-01", 12345.6, "Under Review")
            .unwrap()
            .into_customer(7, DateTime::<Utc>::UNIX_EPOCH);

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["first_name"], "Alice");
        assert_eq!(json["date_of_birth"], "1990-01-01");
        assert_eq!(json["loan_amount_requested"], 12345.6);
        assert_eq!(json["loan_status"], "Under Review");
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn test_has_name_ignores_case() {
        let customer = NewCustomer::new("Alice", "Smith", "1990-01-01", 1.0, "Approved")
            .unwrap()
            .into_customer(1, Utc::now());
        assert!(customer.has_name("alice", "SMITH"));
        assert!(!customer.has_name("Alice", "Smyth"));
    }
}
