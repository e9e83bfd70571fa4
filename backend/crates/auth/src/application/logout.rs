//! Logout Use Case
//!
//! Invalidates a session. Unknown or forged tokens are ignored.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> LogoutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Returns whether a session was deleted
    pub async fn execute(&self, session_token: &str) -> AuthResult<bool> {
        let Some(session_id) = session_token::parse(session_token, &self.config.session_secret)
        else {
            return Ok(false);
        };

        let deleted = self.session_repo.delete(session_id).await?;
        if deleted {
            tracing::info!(session_id = %session_id, "Principal logged out");
        }
        Ok(deleted)
    }
}
