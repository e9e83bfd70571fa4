//! Auth (Session Authority) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, auth gate
//!
//! ## Features
//! - Registration with first name, last name, username + password
//! - Login creating a server-side session referenced by a signed cookie
//! - Logout and session status
//! - `require_session` gate handing the resolved [`Session`] to protected handlers
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (optional pepper)
//! - Session token = session id + HMAC-SHA256 signature
//! - Fixed session lifetime; expired sessions are removed on access
//! - Username uniqueness decided atomically by the store

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::{PersonName, Principal, Session, Username};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryAuthRepository, PgAuthRepository};
pub use presentation::middleware::{AuthMiddlewareState, require_session};
pub use presentation::router::{auth_router, auth_router_generic};
