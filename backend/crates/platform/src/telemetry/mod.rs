//! Telemetry
//!
//! Structured logging plus W3C trace propagation and span export.
//!
//! - [`init_logging`] installs the `tracing` subscriber (`RUST_LOG` aware)
//! - [`init_tracing`] builds the [`Telemetry`] capability, exporting over
//!   OTLP/gRPC when enabled
//! - [`middleware::trace_requests`] derives the per-request [`TraceContext`]
//!
//! Export is best effort. A collector that is down or misconfigured is logged
//! once and never changes a request's outcome.

pub mod middleware;
pub mod propagation;
pub mod span;

use std::sync::Arc;

use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, env_flag, env_or};

pub use middleware::trace_requests;
pub use propagation::TraceContext;
pub use span::{
    ActiveSpan, AttributeValue, InMemorySpanSink, NoopSpanSink, OtelSpanSink, SpanKind,
    SpanRecord, SpanSink, SpanStatus, Telemetry,
};

/// Tracing export settings
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `OTEL_ENABLED`
    pub enabled: bool,
    /// `OTEL_EXPORTER_OTLP_ENDPOINT`
    pub otlp_endpoint: String,
    pub service_name: String,
    /// `ENV`
    pub environment: String,
}

impl TelemetryConfig {
    pub fn from_env(service_name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            enabled: env_flag("OTEL_ENABLED", true)?,
            otlp_endpoint: normalize_endpoint(&env_or(
                "OTEL_EXPORTER_OTLP_ENDPOINT",
                "http://localhost:4317",
            )),
            service_name: service_name.to_string(),
            environment: env_or("ENV", "development"),
        })
    }

    pub fn disabled(service_name: &str) -> Self {
        Self {
            enabled: false,
            otlp_endpoint: String::new(),
            service_name: service_name.to_string(),
            environment: "test".to_string(),
        }
    }
}

/// Collectors are often configured as bare `host:port`; tonic needs a scheme.
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("http://{endpoint}")
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Owns the exporter pipeline; call [`TelemetryGuard::shutdown`] before exit
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flush pending spans
    pub fn shutdown(self) {
        if let Some(provider) = self.provider {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Tracer provider shutdown failed");
            }
        }
    }
}

/// Build the [`Telemetry`] capability
///
/// Must be called inside a Tokio runtime when export is enabled.
pub fn init_tracing(config: &TelemetryConfig) -> (Telemetry, TelemetryGuard) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    if !config.enabled {
        tracing::info!("Span export disabled");
        return (Telemetry::noop(), TelemetryGuard { provider: None });
    }

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otlp_endpoint.clone())
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::warn!(
                error = %e,
                endpoint = %config.otlp_endpoint,
                "OTLP exporter unavailable, continuing without span export"
            );
            return (Telemetry::noop(), TelemetryGuard { provider: None });
        }
    };

    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attributes([KeyValue::new(
            "deployment.environment",
            config.environment.clone(),
        )])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider.clone());
    let tracer = provider.tracer(config.service_name.clone());

    tracing::info!(
        endpoint = %config.otlp_endpoint,
        service = %config.service_name,
        "Span export enabled"
    );

    (
        Telemetry::new(Arc::new(OtelSpanSink::new(tracer))),
        TelemetryGuard {
            provider: Some(provider),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("localhost:4317"), "http://localhost:4317");
        assert_eq!(
            normalize_endpoint("https://collector:4317"),
            "https://collector:4317"
        );
    }

    #[test]
    fn test_disabled_config_yields_noop() {
        let (telemetry, guard) = init_tracing(&TelemetryConfig::disabled("portal"));
        telemetry
            .start_span("unused", SpanKind::Internal, None)
            .end();
        guard.shutdown();
    }
}
