//! Spans as an explicit capability
//!
//! Request pipelines receive a [`Telemetry`] handle instead of reaching for a
//! global tracer. Each [`ActiveSpan`] is turned into a [`SpanRecord`] when it
//! ends and handed to the configured [`SpanSink`]: the OTLP exporter in the
//! binaries, an in-memory recorder in tests, or nothing at all.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::SystemTime;

use axum::http::HeaderMap;
use opentelemetry::trace::{Span as _, SpanBuilder, Status, TraceContextExt};
use opentelemetry::{Context, KeyValue};
use opentelemetry_sdk::trace::SdkTracer;
use parking_lot::Mutex;

use super::propagation::TraceContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Server,
    Client,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpanStatus {
    #[default]
    Unset,
    Ok,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Str(String),
    I64(i64),
    F64(f64),
    Bool(bool),
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Str(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Str(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::I64(v)
    }
}

impl From<u16> for AttributeValue {
    fn from(v: u16) -> Self {
        AttributeValue::I64(i64::from(v))
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::F64(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

/// A finished span
#[derive(Debug, Clone)]
pub struct SpanRecord {
    pub name: Cow<'static, str>,
    pub kind: SpanKind,
    pub context: TraceContext,
    pub parent: Option<TraceContext>,
    pub start: SystemTime,
    pub end: SystemTime,
    pub attributes: Vec<(&'static str, AttributeValue)>,
    pub status: SpanStatus,
}

impl SpanRecord {
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

/// Destination for finished spans
///
/// Implementations must not block and must not fail the caller.
pub trait SpanSink: Send + Sync + 'static {
    fn record(&self, span: SpanRecord);
}

/// Drops every span
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSpanSink;

impl SpanSink for NoopSpanSink {
    fn record(&self, _span: SpanRecord) {}
}

/// Keeps finished spans in memory
#[derive(Debug, Default, Clone)]
pub struct InMemorySpanSink {
    spans: Arc<Mutex<Vec<SpanRecord>>>,
}

impl InMemorySpanSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> Vec<SpanRecord> {
        self.spans.lock().clone()
    }

    /// Most recent span with the given name
    pub fn find(&self, name: &str) -> Option<SpanRecord> {
        self.spans
            .lock()
            .iter()
            .rev()
            .find(|s| s.name == name)
            .cloned()
    }
}

impl SpanSink for InMemorySpanSink {
    fn record(&self, span: SpanRecord) {
        self.spans.lock().push(span);
    }
}

/// Replays finished spans into an OpenTelemetry SDK tracer
///
/// Ids, parentage and timestamps are preserved, so the exported trace matches
/// what was propagated on the wire.
pub struct OtelSpanSink {
    tracer: SdkTracer,
}

impl OtelSpanSink {
    pub fn new(tracer: SdkTracer) -> Self {
        Self { tracer }
    }
}

impl SpanSink for OtelSpanSink {
    fn record(&self, span: SpanRecord) {
        let parent_cx = match span.parent {
            Some(parent) => Context::new().with_remote_span_context(parent.to_span_context()),
            None => Context::new(),
        };

        let attributes = span.attributes.into_iter().map(|(key, value)| match value {
            AttributeValue::Str(v) => KeyValue::new(key, v),
            AttributeValue::I64(v) => KeyValue::new(key, v),
            AttributeValue::F64(v) => KeyValue::new(key, v),
            AttributeValue::Bool(v) => KeyValue::new(key, v),
        });

        let status = match span.status {
            SpanStatus::Unset => Status::Unset,
            SpanStatus::Ok => Status::Ok,
            SpanStatus::Error(description) => Status::error(description),
        };

        let kind = match span.kind {
            SpanKind::Server => opentelemetry::trace::SpanKind::Server,
            SpanKind::Client => opentelemetry::trace::SpanKind::Client,
            SpanKind::Internal => opentelemetry::trace::SpanKind::Internal,
        };

        let mut otel_span = SpanBuilder::from_name(span.name)
            .with_kind(kind)
            .with_trace_id(span.context.trace_id())
            .with_span_id(span.context.span_id())
            .with_start_time(span.start)
            .with_attributes(attributes)
            .with_status(status)
            .start_with_context(&self.tracer, &parent_cx);

        otel_span.end_with_timestamp(span.end);
    }
}

/// Span factory handed to request pipelines
#[derive(Clone)]
pub struct Telemetry {
    sink: Arc<dyn SpanSink>,
}

impl Telemetry {
    pub fn new(sink: Arc<dyn SpanSink>) -> Self {
        Self { sink }
    }

    /// Telemetry that records nothing
    pub fn noop() -> Self {
        Self::new(Arc::new(NoopSpanSink))
    }

    /// Start a span; `parent` of `None` begins a new trace
    pub fn start_span(
        &self,
        name: impl Into<Cow<'static, str>>,
        kind: SpanKind,
        parent: Option<&TraceContext>,
    ) -> ActiveSpan {
        ActiveSpan {
            sink: Arc::clone(&self.sink),
            record: Some(SpanRecord {
                name: name.into(),
                kind,
                context: TraceContext::child_of(parent),
                parent: parent.copied(),
                start: SystemTime::now(),
                end: SystemTime::now(),
                attributes: Vec::new(),
                status: SpanStatus::Unset,
            }),
        }
    }
}

impl std::fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Telemetry").finish_non_exhaustive()
    }
}

/// A span in progress; recorded when ended or dropped
pub struct ActiveSpan {
    sink: Arc<dyn SpanSink>,
    record: Option<SpanRecord>,
}

impl ActiveSpan {
    /// Context to propagate to children of this span
    pub fn context(&self) -> TraceContext {
        match &self.record {
            Some(record) => record.context,
            None => TraceContext::generate(),
        }
    }

    /// Write this span's `traceparent` into outbound headers
    pub fn inject(&self, headers: &mut HeaderMap) {
        self.context().inject(headers);
    }

    pub fn set_attribute(&mut self, key: &'static str, value: impl Into<AttributeValue>) {
        if let Some(record) = self.record.as_mut() {
            record.attributes.push((key, value.into()));
        }
    }

    pub fn set_ok(&mut self) {
        if let Some(record) = self.record.as_mut() {
            record.status = SpanStatus::Ok;
        }
    }

    pub fn set_error(&mut self, description: impl Into<String>) {
        if let Some(record) = self.record.as_mut() {
            record.status = SpanStatus::Error(description.into());
        }
    }

    pub fn end(self) {}
}

impl Drop for ActiveSpan {
    fn drop(&mut self) {
        if let Some(mut record) = self.record.take() {
            record.end = SystemTime::now();
            self.sink.record(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_is_recorded_on_end() {
        let sink = InMemorySpanSink::new();
        let telemetry = Telemetry::new(Arc::new(sink.clone()));

        let mut span = telemetry.start_span("work", SpanKind::Internal, None);
        span.set_attribute("items", 3i64);
        span.set_ok();
        span.end();

        let record = sink.find("work").unwrap();
        assert_eq!(record.status, SpanStatus::Ok);
        assert_eq!(record.attribute("items"), Some(&AttributeValue::I64(3)));
        assert!(record.parent.is_none());
        assert!(record.end >= record.start);
    }

    #[test]
    fn test_dropped_span_is_still_recorded() {
        let sink = InMemorySpanSink::new();
        let telemetry = Telemetry::new(Arc::new(sink.clone()));

        {
            let _span = telemetry.start_span("abandoned", SpanKind::Internal, None);
        }

        assert_eq!(sink.spans().len(), 1);
        assert_eq!(sink.spans()[0].status, SpanStatus::Unset);
    }

    #[test]
    fn test_child_span_links_to_parent() {
        let sink = InMemorySpanSink::new();
        let telemetry = Telemetry::new(Arc::new(sink.clone()));

        let parent = telemetry.start_span("parent", SpanKind::Server, None);
        let parent_cx = parent.context();
        let mut child = telemetry.start_span("child", SpanKind::Client, Some(&parent_cx));
        child.set_error("boom");
        child.end();
        parent.end();

        let child = sink.find("child").unwrap();
        assert_eq!(child.parent, Some(parent_cx));
        assert_eq!(child.context.trace_id(), parent_cx.trace_id());
        assert_eq!(child.status, SpanStatus::Error("boom".into()));
    }

    #[test]
    fn test_inject_uses_span_context() {
        let telemetry = Telemetry::noop();
        let span = telemetry.start_span("client", SpanKind::Client, None);

        let mut headers = HeaderMap::new();
        span.inject(&mut headers);

        assert_eq!(
            headers.get(super::super::propagation::TRACEPARENT).unwrap(),
            span.context().traceparent().as_str()
        );
    }

    #[test]
    fn test_noop_telemetry_accepts_spans() {
        let mut span = Telemetry::noop().start_span("ignored", SpanKind::Internal, None);
        span.set_attribute("k", "v");
        span.end();
    }
}
