//! Register Use Case
//!
//! Creates a new principal.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::principal::Principal;
use crate::domain::repository::PrincipalRepository;
use crate::domain::value_object::{person_name::PersonName, username::Username};
use crate::error::{AuthError, AuthResult};

/// Message returned when any field is blank
pub const FIELDS_REQUIRED: &str = "All fields are required";

/// Register input
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub principal: Principal,
}

/// Register use case
pub struct RegisterUseCase<P>
where
    P: PrincipalRepository,
{
    principal_repo: Arc<P>,
    config: Arc<AuthConfig>,
}

impl<P> RegisterUseCase<P>
where
    P: PrincipalRepository,
{
    pub fn new(principal_repo: Arc<P>, config: Arc<AuthConfig>) -> Self {
        Self {
            principal_repo,
            config,
        }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let any_blank = [
            &input.first_name,
            &input.last_name,
            &input.username,
            &input.password,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if any_blank {
            return Err(AuthError::validation(FIELDS_REQUIRED));
        }

        let first_name =
            PersonName::new(&input.first_name).map_err(|e| AuthError::validation(e.to_string()))?;
        let last_name =
            PersonName::new(&input.last_name).map_err(|e| AuthError::validation(e.to_string()))?;
        let username =
            Username::new(input.username).map_err(|e| AuthError::validation(e.to_string()))?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::validation(e.to_string()))?;

        let verifier = password
            .hash(self.config.pepper())
            .map_err(AuthError::PasswordHashing)?;

        let principal = Principal::new(username, first_name, last_name, verifier);

        if !self.principal_repo.insert_if_absent(&principal).await? {
            return Err(AuthError::UsernameTaken);
        }

        tracing::info!(
            principal_id = %principal.principal_id,
            username = %principal.username,
            "Principal registered"
        );

        Ok(RegisterOutput { principal })
    }
}
