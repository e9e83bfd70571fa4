//! In-Memory Repository Implementation
//!
//! Lock-protected maps for tests and database-less runs. Each operation holds
//! the write lock for its whole check-then-act, which is what makes
//! `insert_if_absent` and `compare_and_swap` atomic.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use kernel::id::SessionId;
use parking_lot::RwLock;

use crate::domain::entity::{principal::Principal, session::Session};
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

#[derive(Default)]
struct Tables {
    principals: HashMap<Username, Principal>,
    sessions: HashMap<SessionId, Session>,
}

/// In-memory auth repository; clones share state
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.tables.read().sessions.len()
    }
}

impl PrincipalRepository for InMemoryAuthRepository {
    async fn insert_if_absent(&self, principal: &Principal) -> AuthResult<bool> {
        let mut tables = self.tables.write();
        match tables.principals.entry(principal.username.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(principal.clone());
                Ok(true)
            }
        }
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Principal>> {
        Ok(self.tables.read().principals.get(username).cloned())
    }
}

impl SessionRepository for InMemoryAuthRepository {
    async fn insert(&self, session: &Session) -> AuthResult<()> {
        self.tables
            .write()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: SessionId) -> AuthResult<Option<Session>> {
        Ok(self.tables.read().sessions.get(&session_id).cloned())
    }

    async fn compare_and_swap(
        &self,
        current: &Session,
        new: Option<&Session>,
    ) -> AuthResult<bool> {
        let mut tables = self.tables.write();
        if tables.sessions.get(&current.session_id) != Some(current) {
            return Ok(false);
        }

        tables.sessions.remove(&current.session_id);
        if let Some(new) = new {
            tables.sessions.insert(new.session_id, new.clone());
        }
        Ok(true)
    }

    async fn delete(&self, session_id: SessionId) -> AuthResult<bool> {
        Ok(self.tables.write().sessions.remove(&session_id).is_some())
    }

    async fn cleanup_expired(&self, now_ms: i64) -> AuthResult<u64> {
        let mut tables = self.tables.write();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| !s.is_expired_at(now_ms));
        let deleted = (before - tables.sessions.len()) as u64;

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");
        Ok(deleted)
    }
}
