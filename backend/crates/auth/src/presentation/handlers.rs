//! HTTP Handlers
//!
//! Responses are HTML fragments, except `check-session` which is JSON.

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse};
use platform::telemetry::{SpanKind, Telemetry, TraceContext};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::repository::{PrincipalRepository, SessionRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, RegisterRequest, SessionStatusResponse};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: PrincipalRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub telemetry: Telemetry,
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    trace: TraceContext,
    Form(req): Form<RegisterRequest>,
) -> AuthResult<Html<String>>
where
    R: PrincipalRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let mut span = state
        .telemetry
        .start_span("auth.register", SpanKind::Internal, Some(&trace));
    span.set_attribute("user.username", req.username.as_str());
    span.set_attribute("user.first_name", req.first_name.as_str());
    span.set_attribute("user.last_name", req.last_name.as_str());

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username,
        password: req.password,
    };

    match use_case.execute(input).await {
        Ok(_) => {
            span.set_ok();
            Ok(Html(platform::html::success_fragment(
                "Registration successful! Please login.",
            )))
        }
        Err(e) => {
            span.set_error(e.user_message());
            Err(e)
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    trace: TraceContext,
    Form(req): Form<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: PrincipalRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let mut span = state
        .telemetry
        .start_span("auth.login", SpanKind::Internal, Some(&trace));
    span.set_attribute("user.username", req.username.as_str());

    let use_case = LoginUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = LoginInput {
        username: req.username,
        password: req.password,
    };

    let output = match use_case.execute(input).await {
        Ok(output) => output,
        Err(e) => {
            span.set_error(e.user_message());
            return Err(e);
        }
    };
    span.set_ok();

    let cookie = state
        .config
        .cookie()
        .build_set_cookie(&output.session_token, state.config.session_ttl);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Html(welcome_fragment(&output.session.display_name())),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: PrincipalRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let cookie_config = state.config.cookie();

    if let Some(token) = cookie_config.read(&headers) {
        let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Session delete failed during logout");
        }
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie_config.build_delete_cookie())],
        Html(platform::html::success_fragment("Logged out successfully")),
    )
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /auth/check-session
pub async fn check_session<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: PrincipalRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let token = state.config.cookie().read(&headers);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let status = use_case.execute(token.as_deref()).await;

    Json(SessionStatusResponse {
        logged_in: status.logged_in,
        username: status.display_name,
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Login success fragment; `data-username` is read by the front end
fn welcome_fragment(display_name: &str) -> String {
    let name = platform::html::escape(display_name);
    format!(
        r#"<div class="success" data-username="{name}">Login successful! Welcome {name}</div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_fragment_escapes_name() {
        let html = welcome_fragment(r#"Eve "<script>""#);
        assert!(!html.contains("<script>"));
        assert!(html.contains("data-username=\"Eve &quot;&lt;script&gt;&quot;\""));
    }
}
