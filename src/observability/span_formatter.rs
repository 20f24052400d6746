//! Span-to-JSON formatting for the file exporter.
//!
//! Each finished span becomes one self-contained JSON object so the trace file
//! can be processed line by line with ordinary tools. Field names and value
//! encodings follow OTLP JSON (`traceId`, `startTimeUnixNano`, typed attribute
//! values) so spans can still be fed to OTLP-aware viewers.

use std::time::{Duration, SystemTime};

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::Value as JsonValue;

/// Formats spans as single-line JSON objects tagged with resource attributes.
pub struct SpanFormatter {
    resource_attributes: Vec<JsonValue>,
    scope: &'static str,
}

impl SpanFormatter {
    #[must_use]
    pub fn new(resource: &Resource, scope: &'static str) -> Self {
        let resource_attributes = resource
            .iter()
            .map(|(k, v)| {
                serde_json::json!({
                    "key": k.to_string(),
                    "value": format_attribute_value(v),
                })
            })
            .collect();

        Self {
            resource_attributes,
            scope,
        }
    }

    /// One JSON object for `span`.
    ///
    /// ```json
    /// {
    ///   "resource": [{"key": "service.name", "value": {"stringValue": "practice-feed"}}],
    ///   "scope": "practice-feed",
    ///   "traceId": "...", "spanId": "...", "parentSpanId": "",
    ///   "name": "handle_event", "kind": 1,
    ///   "startTimeUnixNano": "...", "endTimeUnixNano": "...", "durationMicros": 42,
    ///   "attributes": [...], "events": [...], "links": [...],
    ///   "status": {"code": 0, "message": ""}
    /// }
    /// ```
    #[must_use]
    pub fn format_span(&self, span: &SpanData) -> JsonValue {
        let (status_code, status_message) = format_status(&span.status);
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO);

        serde_json::json!({
            "resource": self.resource_attributes,
            "scope": self.scope,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": if span.parent_span_id == SpanId::INVALID {
                String::new()
            } else {
                format!("{:016x}", span.parent_span_id)
            },
            "name": span.name,
            "kind": span_kind_to_int(&span.span_kind),
            "startTimeUnixNano": unix_nanos(span.start_time),
            "endTimeUnixNano": unix_nanos(span.end_time),
            "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "attributes": format_attributes(&span.attributes),
            "events": format_events(&span.events),
            "links": format_links(&span.links),
            "status": {
                "code": status_code,
                "message": status_message,
            },
        })
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

/// OTLP span kind codes: internal 1, server 2, client 3, producer 4, consumer 5.
const fn span_kind_to_int(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn format_attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| {
            serde_json::json!({
                "key": kv.key.to_string(),
                "value": format_attribute_value(&kv.value),
            })
        })
        .collect()
}

/// Integers are strings as in OTLP JSON; arrays fall back to their debug form.
fn format_attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => serde_json::json!({ "boolValue": b }),
        Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
        Value::F64(f) => serde_json::json!({ "doubleValue": f }),
        Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
        Value::Array(_) => serde_json::json!({ "stringValue": format!("{value:?}") }),
    }
}

fn format_events(events: &[Event]) -> Vec<JsonValue> {
    events
        .iter()
        .map(|event| {
            serde_json::json!({
                "timeUnixNano": unix_nanos(event.timestamp),
                "name": event.name,
                "attributes": format_attributes(&event.attributes),
            })
        })
        .collect()
}

fn format_links(links: &[Link]) -> Vec<JsonValue> {
    links
        .iter()
        .map(|link| {
            serde_json::json!({
                "traceId": format!("{:032x}", link.span_context.trace_id()),
                "spanId": format!("{:016x}", link.span_context.span_id()),
                "attributes": format_attributes(&link.attributes),
            })
        })
        .collect()
}

fn format_status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}
