//! Login Use Case
//!
//! Authenticates a principal and creates a session.

use std::sync::{Arc, LazyLock};

use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Message returned when username or password is blank
pub const CREDENTIALS_REQUIRED: &str = "Username and password are required";

/// Checked in place of a stored verifier when the username is unknown
static UNKNOWN_USER_VERIFIER: LazyLock<Option<HashedPassword>> = LazyLock::new(|| {
    ClearTextPassword::new("unknown-user".to_string())
        .ok()
        .and_then(|password| password.hash(None).ok())
});

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Session token for cookie
    pub session_token: String,
    pub session: Session,
}

/// Login use case
pub struct LoginUseCase<P, S>
where
    P: PrincipalRepository,
    S: SessionRepository,
{
    principal_repo: Arc<P>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<P, S> LoginUseCase<P, S>
where
    P: PrincipalRepository,
    S: SessionRepository,
{
    pub fn new(principal_repo: Arc<P>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            principal_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        if input.username.trim().is_empty() || input.password.trim().is_empty() {
            return Err(AuthError::validation(CREDENTIALS_REQUIRED));
        }

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        // Malformed usernames cannot exist in the store
        let principal = match Username::new(input.username) {
            Ok(username) => self.principal_repo.find_by_username(&username).await?,
            Err(_) => None,
        };

        // Unknown usernames pay the same hash cost as wrong passwords
        let Some(principal) = principal else {
            if let Some(verifier) = unknown_user_verifier() {
                verifier.verify(&password, self.config.pepper());
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !principal.password.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session::new(&principal, self.config.session_ttl_chrono());
        self.session_repo.insert(&session).await?;

        let session_token = session_token::issue(session.session_id, &self.config.session_secret);

        tracing::info!(
            principal_id = %principal.principal_id,
            session_id = %session.session_id,
            "Principal logged in"
        );

        Ok(LoginOutput {
            session_token,
            session,
        })
    }
}

pub(crate) fn unknown_user_verifier() -> Option<&'static HashedPassword> {
    UNKNOWN_USER_VERIFIER.as_ref()
}
