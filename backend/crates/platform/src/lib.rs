//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the portal and the record service:
//! - Environment configuration helpers
//! - Session cookie handling
//! - HMAC signing and secret decoding
//! - Password hashing (Argon2id)
//! - HTML fragment escaping
//! - Logging, W3C trace propagation and span export

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod html;
pub mod password;
pub mod telemetry;
