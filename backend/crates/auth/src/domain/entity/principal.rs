//! Principal Entity
//!
//! A registered identity. Immutable once registered.

use chrono::{DateTime, Utc};
use kernel::id::PrincipalId;
use platform::password::HashedPassword;

use crate::domain::value_object::{person_name::PersonName, username::Username};

#[derive(Debug, Clone)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Argon2id verifier; redacted in `Debug`
    pub password: HashedPassword,
    pub created_at: DateTime<Utc>,
}

impl Principal {
    pub fn new(
        username: Username,
        first_name: PersonName,
        last_name: PersonName,
        password: HashedPassword,
    ) -> Self {
        Self {
            principal_id: PrincipalId::new(),
            username,
            first_name,
            last_name,
            password,
            created_at: Utc::now(),
        }
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
