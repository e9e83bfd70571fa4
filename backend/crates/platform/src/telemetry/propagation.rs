//! W3C Trace Context propagation
//!
//! [`TraceContext`] is the request-scoped correlation value: it is read from an
//! inbound `traceparent` header, handed to handlers through request extensions,
//! and written to outbound requests. Header parsing and formatting are
//! delegated to the OpenTelemetry `TraceContextPropagator`.

use std::fmt;

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::trace::{
    SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
};
use opentelemetry::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;

/// `traceparent` header name
pub const TRACEPARENT: &str = "traceparent";

/// Trace correlation for one unit of work
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceContext {
    trace_id: TraceId,
    span_id: SpanId,
    sampled: bool,
}

impl TraceContext {
    /// New root context with random ids
    pub fn generate() -> Self {
        Self {
            trace_id: random_trace_id(),
            span_id: random_span_id(),
            sampled: true,
        }
    }

    /// Context for a new span under `parent`, or a new root when there is none
    pub fn child_of(parent: Option<&TraceContext>) -> Self {
        match parent {
            Some(parent) => Self {
                trace_id: parent.trace_id,
                span_id: random_span_id(),
                sampled: parent.sampled,
            },
            None => Self::generate(),
        }
    }

    /// Parse a valid `traceparent` from request headers
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let cx = TraceContextPropagator::new().extract(&HeaderExtractor(headers));
        let span_context = cx.span().span_context().clone();

        span_context.is_valid().then(|| Self {
            trace_id: span_context.trace_id(),
            span_id: span_context.span_id(),
            sampled: span_context.is_sampled(),
        })
    }

    /// Write `traceparent` for this context into outbound headers
    pub fn inject(&self, headers: &mut HeaderMap) {
        let cx = Context::new().with_remote_span_context(self.to_span_context());
        TraceContextPropagator::new().inject_context(&cx, &mut HeaderInjector(headers));
    }

    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    pub fn span_id(&self) -> SpanId {
        self.span_id
    }

    pub fn is_sampled(&self) -> bool {
        self.sampled
    }

    /// `00-<trace-id>-<span-id>-<flags>`
    pub fn traceparent(&self) -> String {
        format!(
            "00-{}-{}-{:02x}",
            self.trace_id,
            self.span_id,
            self.trace_flags().to_u8()
        )
    }

    fn trace_flags(&self) -> TraceFlags {
        if self.sampled {
            TraceFlags::SAMPLED
        } else {
            TraceFlags::default()
        }
    }

    pub(crate) fn to_span_context(self) -> SpanContext {
        SpanContext::new(
            self.trace_id,
            self.span_id,
            self.trace_flags(),
            true,
            TraceState::default(),
        )
    }
}

impl fmt::Debug for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceContext")
            .field("trace_id", &format_args!("{}", self.trace_id))
            .field("span_id", &format_args!("{}", self.span_id))
            .field("sampled", &self.sampled)
            .finish()
    }
}

fn random_trace_id() -> TraceId {
    loop {
        let id = TraceId::from_bytes(rand::random::<[u8; 16]>());
        if id != TraceId::INVALID {
            return id;
        }
    }
}

fn random_span_id() -> SpanId {
    loop {
        let id = SpanId::from_bytes(rand::random::<[u8; 8]>());
        if id != SpanId::INVALID {
            return id;
        }
    }
}

/// Read-only view of request headers for the propagator
pub struct HeaderExtractor<'a>(pub &'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Writable view of outbound headers for the propagator
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if value.is_empty() {
            return;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INBOUND: &str = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01";

    fn headers_with(traceparent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(TRACEPARENT, HeaderValue::from_str(traceparent).unwrap());
        headers
    }

    #[test]
    fn test_from_headers_reads_valid_traceparent() {
        let cx = TraceContext::from_headers(&headers_with(INBOUND)).unwrap();
        assert_eq!(cx.trace_id().to_string(), "4bf92f3577b34da6a3ce929d0e0e4736");
        assert_eq!(cx.span_id().to_string(), "00f067aa0ba902b7");
        assert!(cx.is_sampled());
        assert_eq!(cx.traceparent(), INBOUND);
    }

    #[test]
    fn test_from_headers_rejects_missing_or_invalid() {
        assert!(TraceContext::from_headers(&HeaderMap::new()).is_none());
        assert!(TraceContext::from_headers(&headers_with("garbage")).is_none());
        assert!(
            TraceContext::from_headers(&headers_with(
                "00-00000000000000000000000000000000-00f067aa0ba902b7-01"
            ))
            .is_none()
        );
    }

    #[test]
    fn test_inject_writes_traceparent() {
        let cx = TraceContext::from_headers(&headers_with(INBOUND)).unwrap();
        let child = TraceContext::child_of(Some(&cx));

        let mut outbound = HeaderMap::new();
        child.inject(&mut outbound);

        let written = outbound.get(TRACEPARENT).unwrap().to_str().unwrap();
        assert_eq!(written, child.traceparent());
        assert!(written.contains("4bf92f3577b34da6a3ce929d0e0e4736"));
        assert!(!written.contains("00f067aa0ba902b7"));
    }

    #[test]
    fn test_child_keeps_trace_and_sampling() {
        let parent = TraceContext::generate();
        let child = TraceContext::child_of(Some(&parent));
        assert_eq!(child.trace_id(), parent.trace_id());
        assert_ne!(child.span_id(), parent.span_id());
        assert_eq!(child.is_sampled(), parent.is_sampled());

        let root = TraceContext::child_of(None);
        assert_ne!(root.trace_id(), parent.trace_id());
    }

    #[test]
    fn test_unsampled_flag_roundtrips() {
        let inbound = "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-00";
        let cx = TraceContext::from_headers(&headers_with(inbound)).unwrap();
        assert!(!cx.is_sampled());
        assert_eq!(cx.traceparent(), inbound);
    }
}
