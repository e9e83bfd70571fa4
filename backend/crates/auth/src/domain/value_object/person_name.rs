//! Person Name Value Object
//!
//! First / last name of a principal. These are the keys used to look the
//! principal up in the government record service, so they are stored trimmed.

use derive_more::Display;
use thiserror::Error;

/// Maximum length for a single name part (in characters)
pub const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonNameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: &str) -> Result<Self, PersonNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PersonNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > PERSON_NAME_MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                length,
                max: PERSON_NAME_MAX_LENGTH,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(PersonName::new("  Alice ").unwrap().as_str(), "Alice");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(PersonName::new(" \t "), Err(PersonNameError::Empty));
    }

    #[test]
    fn test_name_length_limit() {
        assert!(matches!(
            PersonName::new(&"x".repeat(PERSON_NAME_MAX_LENGTH + 1)),
            Err(PersonNameError::TooLong { .. })
        ));
    }
}
