//! Form and JSON DTOs
//!
//! Form fields default to empty so that a missing field is reported with the
//! same message as a blank one instead of an extractor rejection.

use serde::{Deserialize, Serialize};

/// `POST /auth/register` form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

/// `POST /auth/login` form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `GET /auth/check-session` response
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
