//! HTTP Handlers

use std::sync::Arc;

use auth::Session;
use axum::Extension;
use axum::extract::State;
use axum::response::Html;
use platform::telemetry::{Telemetry, TraceContext};

use crate::application::config::GatewayConfig;
use crate::application::{ValidateLoanInput, ValidateLoanUseCase};
use crate::domain::client::RecordClient;
use crate::error::LoanResult;
use crate::presentation::render::render_outcome;

/// Shared state for loan handlers
pub struct LoanAppState<C>
where
    C: RecordClient + Send + Sync + 'static,
{
    pub client: Arc<C>,
    pub config: Arc<GatewayConfig>,
    pub telemetry: Telemetry,
}

impl<C> Clone for LoanAppState<C>
where
    C: RecordClient + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            telemetry: self.telemetry.clone(),
        }
    }
}

/// GET /api/validate-loan
///
/// Must sit behind `auth::require_session`, which provides the `Session`.
pub async fn validate_loan<C>(
    State(state): State<LoanAppState<C>>,
    trace: TraceContext,
    Extension(session): Extension<Session>,
) -> LoanResult<Html<String>>
where
    C: RecordClient + Send + Sync + 'static,
{
    let use_case = ValidateLoanUseCase::new(
        state.client.clone(),
        state.config.clone(),
        state.telemetry.clone(),
    );

    let input = ValidateLoanInput {
        first_name: session.first_name.as_str(),
        last_name: session.last_name.as_str(),
    };

    let outcome = use_case.execute(input, Some(&trace)).await?;
    Ok(Html(render_outcome(&outcome)))
}
