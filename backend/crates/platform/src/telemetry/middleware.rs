//! Request tracing middleware
//!
//! Opens a server span per request, exposes its [`TraceContext`] to handlers,
//! and runs the rest of the stack inside a `tracing` span carrying `trace_id`
//! so every log line of the request can be correlated.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, MatchedPath, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;

use super::propagation::TraceContext;
use super::span::{SpanKind, Telemetry};

/// Response header echoing the request's trace id
pub const TRACE_ID_HEADER: HeaderName = HeaderName::from_static("x-trace-id");

/// Use with `axum::middleware::from_fn_with_state(telemetry, trace_requests)`
pub async fn trace_requests(
    State(telemetry): State<Telemetry>,
    mut req: Request,
    next: Next,
) -> Response {
    let remote = TraceContext::from_headers(req.headers());
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let mut span = telemetry.start_span(
        format!("{method} {route}"),
        SpanKind::Server,
        remote.as_ref(),
    );
    span.set_attribute("http.method", method.as_str());
    span.set_attribute("http.route", route.clone());

    let cx = span.context();
    req.extensions_mut().insert(cx);

    let log_span = tracing::info_span!(
        "request",
        trace_id = %cx.trace_id(),
        method = %method,
        route = %route,
    );

    let mut response = next.run(req).instrument(log_span.clone()).await;

    let status = response.status();
    span.set_attribute("http.status_code", status.as_u16());
    if status.is_server_error() {
        span.set_error(status.to_string());
    }
    span.end();

    log_span.in_scope(|| tracing::debug!(status = status.as_u16(), "request finished"));

    if let Ok(value) = HeaderValue::from_str(&cx.trace_id().to_string()) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

/// Handlers can take `TraceContext` directly. Without the middleware it falls
/// back to the inbound header, then to a fresh root context.
impl<S> FromRequestParts<S> for TraceContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<TraceContext>()
            .copied()
            .or_else(|| TraceContext::from_headers(&parts.headers))
            .unwrap_or_else(TraceContext::generate))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    use super::*;
    use crate::telemetry::propagation::TRACEPARENT;
    use crate::telemetry::span::{AttributeValue, InMemorySpanSink, SpanStatus};

    const INBOUND: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    async fn echo_trace(cx: TraceContext) -> String {
        cx.trace_id().to_string()
    }

    async fn fail() -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn app(sink: &InMemorySpanSink) -> Router {
        let telemetry = Telemetry::new(Arc::new(sink.clone()));
        Router::new()
            .route("/echo", get(echo_trace))
            .route("/fail", get(fail))
            .layer(axum::middleware::from_fn_with_state(
                telemetry,
                trace_requests,
            ))
    }

    #[tokio::test]
    async fn test_inbound_trace_id_is_continued() {
        let sink = InMemorySpanSink::new();
        let response = app(&sink)
            .oneshot(
                Request::builder()
                    .uri("/echo")
                    .header(TRACEPARENT, INBOUND)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(TRACE_ID_HEADER).unwrap(),
            "4bf92f3577b34da6a3ce929d0e0e4736"
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"4bf92f3577b34da6a3ce929d0e0e4736");

        let server = sink.find("GET /echo").unwrap();
        assert_eq!(
            server.parent.unwrap().span_id().to_string(),
            "00f067aa0ba902b7"
        );
        assert_eq!(
            server.attribute("http.status_code"),
            Some(&AttributeValue::I64(200))
        );
    }

    #[tokio::test]
    async fn test_missing_header_starts_new_trace() {
        let sink = InMemorySpanSink::new();
        let response = app(&sink)
            .oneshot(Request::builder().uri("/echo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = response.headers().get(TRACE_ID_HEADER).unwrap().clone();
        assert_eq!(header.len(), 32);

        let server = sink.find("GET /echo").unwrap();
        assert!(server.parent.is_none());
        assert_eq!(server.context.trace_id().to_string(), header.to_str().unwrap());
    }

    #[tokio::test]
    async fn test_server_errors_mark_span() {
        let sink = InMemorySpanSink::new();
        let response = app(&sink)
            .oneshot(Request::builder().uri("/fail").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let server = sink.find("GET /fail").unwrap();
        assert!(matches!(server.status, SpanStatus::Error(_)));
    }
}
