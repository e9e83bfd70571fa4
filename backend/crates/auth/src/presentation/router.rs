//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::telemetry::Telemetry;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig, telemetry: Telemetry) -> Router {
    auth_router_generic(repo, config, telemetry)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig, telemetry: Telemetry) -> Router
where
    R: PrincipalRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        telemetry,
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/check-session", get(handlers::check_session::<R>))
        .with_state(state)
}
