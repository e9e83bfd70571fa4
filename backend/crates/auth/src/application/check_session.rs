//! Check Session Use Case
//!
//! Resolves a session token to a live [`Session`]. This is the single
//! decision point behind both `/auth/check-session` and the auth gate
//! middleware, and it fails closed: anything short of a correctly signed
//! token for a stored, unexpired session is `SessionInvalid`.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Session status output
pub struct SessionStatusOutput {
    pub logged_in: bool,
    /// "First Last" when logged in
    pub display_name: Option<String>,
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Report login state; never fails
    pub async fn execute(&self, session_token: Option<&str>) -> SessionStatusOutput {
        let session = match session_token {
            Some(token) => self.authenticate(token).await,
            None => Err(AuthError::SessionInvalid),
        };

        match session {
            Ok(session) => SessionStatusOutput {
                logged_in: true,
                display_name: Some(session.display_name()),
            },
            Err(e) => {
                if !matches!(e, AuthError::SessionInvalid) {
                    tracing::warn!(error = %e, "Session lookup failed, reporting logged out");
                }
                SessionStatusOutput {
                    logged_in: false,
                    display_name: None,
                }
            }
        }
    }

    /// Resolve a token to its session
    ///
    /// Expired sessions are removed on access.
    pub async fn authenticate(&self, session_token: &str) -> AuthResult<Session> {
        let session_id = session_token::parse(session_token, &self.config.session_secret)
            .ok_or(AuthError::SessionInvalid)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired_at(Utc::now().timestamp_millis()) {
            if self.session_repo.compare_and_swap(&session, None).await? {
                tracing::debug!(session_id = %session.session_id, "Expired session removed");
            }
            return Err(AuthError::SessionInvalid);
        }

        Ok(session)
    }
}
