//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{principal::Principal, session::Session};
pub use repository::{PrincipalRepository, SessionRepository};
pub use value_object::{person_name::PersonName, username::Username};
