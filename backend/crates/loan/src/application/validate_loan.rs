//! Validate Loan Use Case
//!
//! One synchronous lookup against the record service:
//! build query -> call (bounded by the configured timeout) -> classify.
//!
//! | Downstream result            | Outcome                           |
//! |------------------------------|-----------------------------------|
//! | no response / timeout        | `LoanError::DownstreamUnreachable`|
//! | 404                          | `LoanOutcome::NotFound`           |
//! | other non-2xx                | `LoanError::DownstreamStatus`     |
//! | 2xx, body not a loan record  | `LoanError::Decode`               |
//! | 2xx, loan record             | `LoanOutcome::Found`              |
//!
//! There is a single attempt; nothing is retried or cached.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::telemetry::{SpanKind, Telemetry, TraceContext};

use crate::application::config::GatewayConfig;
use crate::domain::client::{RecordClient, TransportError};
use crate::domain::record::{LoanOutcome, LoanRecord, RecordQuery};
use crate::error::{LoanError, LoanResult};

/// Peer name recorded on the client span
pub const PEER_SERVICE: &str = "government-loan-bank";

/// Names taken from the authenticated session
pub struct ValidateLoanInput<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
}

pub struct ValidateLoanUseCase<C>
where
    C: RecordClient,
{
    client: Arc<C>,
    config: Arc<GatewayConfig>,
    telemetry: Telemetry,
}

impl<C> ValidateLoanUseCase<C>
where
    C: RecordClient,
{
    pub fn new(client: Arc<C>, config: Arc<GatewayConfig>, telemetry: Telemetry) -> Self {
        Self {
            client,
            config,
            telemetry,
        }
    }

    pub async fn execute(
        &self,
        input: ValidateLoanInput<'_>,
        parent: Option<&TraceContext>,
    ) -> LoanResult<LoanOutcome> {
        let mut span = self
            .telemetry
            .start_span("api.validate_loan", SpanKind::Internal, parent);
        span.set_attribute("user.first_name", input.first_name);
        span.set_attribute("user.last_name", input.last_name);

        tracing::info!(
            first_name = %input.first_name,
            last_name = %input.last_name,
            "Loan validation request"
        );

        let query = match RecordQuery::from_session(input.first_name, input.last_name) {
            Ok(query) => query,
            Err(e) => {
                span.set_error("Session expired");
                return Err(e);
            }
        };

        let span_cx = span.context();
        let outcome = self.lookup(&query, &span_cx).await;

        match &outcome {
            Ok(LoanOutcome::Found(record)) => {
                span.set_attribute("loan.status", record.loan_status.as_str());
                span.set_attribute("loan.amount", record.loan_amount_requested);
                span.set_ok();

                tracing::info!(
                    loan_status = %record.loan_status,
                    loan_amount = record.loan_amount_requested,
                    "Loan validation successful"
                );
            }
            Ok(LoanOutcome::NotFound) => {
                span.set_ok();
                tracing::warn!(
                    first_name = %query.first_name(),
                    last_name = %query.last_name(),
                    "User not found in government portal"
                );
            }
            Err(e) => span.set_error(e.to_string()),
        }

        outcome
    }

    async fn lookup(&self, query: &RecordQuery, parent: &TraceContext) -> LoanResult<LoanOutcome> {
        let url = self.client.lookup_url(query);

        let mut http_span = self.telemetry.start_span(
            "http.client.government_bank",
            SpanKind::Client,
            Some(parent),
        );
        http_span.set_attribute("http.url", url);
        http_span.set_attribute("http.method", "GET");
        http_span.set_attribute("peer.service", PEER_SERVICE);

        let mut headers = HeaderMap::new();
        http_span.inject(&mut headers);

        let response =
            match tokio::time::timeout(self.config.timeout, self.client.fetch(query, headers))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    http_span.set_error("Connection failed");
                    return Err(LoanError::DownstreamUnreachable(e));
                }
                Err(_) => {
                    http_span.set_error("Connection failed");
                    return Err(LoanError::DownstreamUnreachable(TransportError::Timeout));
                }
            };

        http_span.set_attribute("http.status_code", response.status);
        let status = response.status;

        if status == 404 {
            http_span.end();
            return Ok(LoanOutcome::NotFound);
        }

        if !(200..300).contains(&status) {
            http_span.set_error(format!("Unexpected status code: {status}"));
            return Err(LoanError::DownstreamStatus(status));
        }

        http_span.set_ok();
        http_span.end();

        LoanRecord::from_json(&response.body).map(LoanOutcome::Found)
    }
}
