//! Username Value Object
//!
//! ユーザー名はログイン時の識別子。
//!
//! ## 不変条件
//! - 空文字・空白のみは不可
//! - 入力をそのまま保持する（trim・大文字小文字の正規化なし）
//! - 比較は完全一致（case-sensitive）
//! - 長さ: 最大 [`USERNAME_MAX_LENGTH`] 文字
//! - 制御文字は不可

use derive_more::Display;
use thiserror::Error;

/// Maximum length for usernames (in characters)
pub const USERNAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("Username contains control characters")]
    InvalidCharacter,
}

/// Login identifier, unique across principals
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl Into<String>) -> Result<Self, UsernameError> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(UsernameError::Empty);
        }

        let length = raw.chars().count();
        if length > USERNAME_MAX_LENGTH {
            return Err(UsernameError::TooLong {
                length,
                max: USERNAME_MAX_LENGTH,
            });
        }

        if raw.chars().any(char::is_control) {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_kept_verbatim() {
        let name = Username::new("Alice.Smith").unwrap();
        assert_eq!(name.as_str(), "Alice.Smith");
        assert_eq!(name.to_string(), "Alice.Smith");
    }

    #[test]
    fn test_username_is_case_sensitive() {
        assert_ne!(Username::new("alice").unwrap(), Username::new("Alice").unwrap());
    }

    #[test]
    fn test_blank_username_rejected() {
        assert_eq!(Username::new(""), Err(UsernameError::Empty));
        assert_eq!(Username::new("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_username_length_limit() {
        assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH)).is_ok());
        assert!(matches!(
            Username::new("a".repeat(USERNAME_MAX_LENGTH + 1)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(
            Username::new("ali\nce"),
            Err(UsernameError::InvalidCharacter)
        );
    }
}
