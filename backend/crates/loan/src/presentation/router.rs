//! Loan Router

use std::sync::Arc;

use axum::{Router, routing::get};
use platform::telemetry::Telemetry;

use crate::application::config::GatewayConfig;
use crate::domain::client::RecordClient;
use crate::infra::http_client::HttpRecordClient;
use crate::presentation::handlers::{self, LoanAppState};

/// Create the loan router with the HTTP record service client
///
/// The caller is responsible for layering the auth gate on top.
pub fn loan_router(
    client: HttpRecordClient,
    config: GatewayConfig,
    telemetry: Telemetry,
) -> Router {
    loan_router_generic(client, config, telemetry)
}

/// Create a generic loan router for any record client
pub fn loan_router_generic<C>(client: C, config: GatewayConfig, telemetry: Telemetry) -> Router
where
    C: RecordClient + Send + Sync + 'static,
{
    let state = LoanAppState {
        client: Arc::new(client),
        config: Arc::new(config),
        telemetry,
    };

    Router::new()
        .route("/validate-loan", get(handlers::validate_loan::<C>))
        .with_state(state)
}
