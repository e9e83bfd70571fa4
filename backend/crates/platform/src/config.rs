//! Environment Configuration
//!
//! Helpers for reading settings from the process environment (after `.env`
//! has been loaded by the binary). Missing variables fall back to a default;
//! present but unparsable variables are an error rather than a silent default.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {key} has an invalid value: {value:?}")]
    Invalid { key: String, value: String },
}

/// Raw string value, or `default` when unset or empty
pub fn env_or(key: &str, default: &str) -> String {
    value_or(std::env::var(key).ok(), default)
}

/// Parsed value, or `default` when unset or empty
pub fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    parse_or(key, std::env::var(key).ok(), default)
}

/// Boolean flag accepting `true/false`, `1/0`, `yes/no`, `on/off`
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    flag_or(key, std::env::var(key).ok(), default)
}

/// Comma-separated list with blank entries removed
pub fn env_list(key: &str, default: &str) -> Vec<String> {
    split_list(&env_or(key, default))
}

/// Optional value; unset and empty are both `None`
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn value_or(raw: Option<String>, default: &str) -> String {
    match raw {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value: v,
        }),
        _ => Ok(default),
    }
}

fn flag_or(key: &str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };
    match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: v,
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// PostgreSQL connection settings (`DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`)
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Read from the environment; `default_name` differs per service
    pub fn from_env(default_name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("DB_HOST", "localhost"),
            port: env_parse("DB_PORT", 5432)?,
            user: env_or("DB_USER", "postgres"),
            password: env_or("DB_PASSWORD", "postgres"),
            name: env_or("DB_NAME", default_name),
        })
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_or_default() {
        assert_eq!(value_or(None, "localhost"), "localhost");
        assert_eq!(value_or(Some("  ".into()), "localhost"), "localhost");
        assert_eq!(value_or(Some(" db ".into()), "localhost"), "db");
    }

    #[test]
    fn test_parse_or() {
        assert_eq!(parse_or("PORT", None, 8080u16), Ok(8080));
        assert_eq!(parse_or("PORT", Some("9090".into()), 8080u16), Ok(9090));
        assert_eq!(
            parse_or("PORT", Some("http".into()), 8080u16),
            Err(ConfigError::Invalid {
                key: "PORT".into(),
                value: "http".into()
            })
        );
    }

    #[test]
    fn test_flag_or() {
        assert_eq!(flag_or("F", None, true), Ok(true));
        assert_eq!(flag_or("F", Some("off".into()), true), Ok(false));
        assert_eq!(flag_or("F", Some("YES".into()), false), Ok(true));
        assert!(flag_or("F", Some("maybe".into()), false).is_err());
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("http://a, ,http://b,"),
            vec!["http://a".to_string(), "http://b".to_string()]
        );
    }

    #[test]
    fn test_database_config_debug_redacts_password() {
        let config = DatabaseConfig {
            host: "localhost".into(),
            port: 5432,
            user: "postgres".into(),
            password: "topsecret".into(),
            name: "loan_validator_db".into(),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("loan_validator_db"));
    }
}
