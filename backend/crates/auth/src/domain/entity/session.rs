//! Session Entity
//!
//! Server-side login state. The client only holds a signed reference to
//! `session_id`; everything else lives here.
//!
//! Identity attributes are a snapshot taken at login and are never refreshed.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{PrincipalId, SessionId};

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::{person_name::PersonName, username::Username};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: SessionId,
    pub principal_id: PrincipalId,
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub created_at: DateTime<Utc>,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl Session {
    /// Open a session for `principal`
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(principal: &Principal, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            principal_id: principal.principal_id,
            username: principal.username.clone(),
            first_name: principal.first_name.clone(),
            last_name: principal.last_name.clone(),
            created_at: now,
            expires_at_ms: (now + ttl).timestamp_millis(),
        }
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn principal() -> Principal {
        let password = ClearTextPassword::new("pw".to_string()).unwrap();
        Principal::new(
            Username::new("alice").unwrap(),
            PersonName::new("Alice").unwrap(),
            PersonName::new("Smith").unwrap(),
            password.hash(None).unwrap(),
        )
    }

    #[test]
    fn test_session_snapshots_identity() {
        let principal = principal();
        let session = Session::new(&principal, Duration::hours(12));

        assert_eq!(session.principal_id, principal.principal_id);
        assert_eq!(session.username, principal.username);
        assert_eq!(session.display_name(), "Alice Smith");
        assert!(!session.is_expired_at(Utc::now().timestamp_millis()));
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::new(&principal(), Duration::seconds(60));
        assert!(!session.is_expired_at(session.expires_at_ms - 1));
        assert!(session.is_expired_at(session.expires_at_ms));
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        let session = Session::new(&principal(), Duration::zero());
        assert!(session.is_expired_at(Utc::now().timestamp_millis()));
    }
}
