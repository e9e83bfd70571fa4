//! Auth Middleware
//!
//! Gate for protected routes. On success the resolved [`Session`] is put
//! into request extensions, so handlers take it as `Extension<Session>`.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid session
///
/// ```ignore
/// let gate = AuthMiddlewareState { repo, config };
/// router.route_layer(axum::middleware::from_fn(move |req: Request<Body>, next: Next| {
///     require_session(gate.clone(), req, next)
/// }))
/// ```
pub async fn require_session<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let Some(token) = state.config.cookie().read(req.headers()) else {
        tracing::debug!("No session cookie");
        return Err(AuthError::SessionInvalid.into_response());
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session: Session = match use_case.authenticate(&token).await {
        Ok(session) => session,
        Err(AuthError::SessionInvalid) => {
            return Err(AuthError::SessionInvalid.into_response());
        }
        Err(e) => {
            // Store failures fail closed
            tracing::error!(error = %e, "Error checking auth session");
            return Err(AuthError::SessionInvalid.into_response());
        }
    };

    tracing::debug!(session_id = %session.session_id, "Session accepted");
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
