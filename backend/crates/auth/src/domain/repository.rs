//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Writes that race on one key are decided by the store itself:
//! [`PrincipalRepository::insert_if_absent`] and
//! [`SessionRepository::compare_and_swap`] are atomic per key.

use kernel::id::SessionId;

use crate::domain::entity::{principal::Principal, session::Session};
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

/// Principal repository trait
#[trait_variant::make(PrincipalRepository: Send)]
pub trait LocalPrincipalRepository {
    /// Store `principal` unless its username is taken
    ///
    /// Returns `false` when another principal already owns the username.
    async fn insert_if_absent(&self, principal: &Principal) -> AuthResult<bool>;

    /// Find principal by exact username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Principal>>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn insert(&self, session: &Session) -> AuthResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: SessionId) -> AuthResult<Option<Session>>;

    /// Replace `current` with `new` (or remove it when `new` is `None`)
    ///
    /// Only succeeds if the stored session still equals `current`. Returns
    /// whether the swap happened.
    async fn compare_and_swap(
        &self,
        current: &Session,
        new: Option<&Session>,
    ) -> AuthResult<bool>;

    /// Delete a session; returns whether it existed
    async fn delete(&self, session_id: SessionId) -> AuthResult<bool>;

    /// Clean up sessions expired at `now_ms`
    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64>;
}
