//! Request and response protocol between the feed state and the fetch worker.
//!
//! Every fetch carries a request id chosen by the feed state. Responses echo it
//! back so the state can discard answers to requests it no longer waits for.
//! Messages also carry the OpenTelemetry context of the span that issued them,
//! so worker spans are parented to the event that triggered the fetch even
//! though they run on another task.

use crate::domain::{Credential, FeedEntry, PageQuery};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-task span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Rebuilds a remote OpenTelemetry context from the captured ids.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn to_otel_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Why a page is being fetched.
///
/// `Initial` and `Refresh` both request page 0 and replace the feed; `More`
/// requests the next page and appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchKind {
    Initial,
    Refresh,
    More,
}

impl FetchKind {
    /// Whether a successful response replaces the feed instead of extending it.
    #[must_use]
    pub const fn replaces(self) -> bool {
        matches!(self, Self::Initial | Self::Refresh)
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    fetch_page(FetchPage { request_id: u64, kind: FetchKind, credential: Credential, query: PageQuery }),
    cancel(Cancel { request_id: u64 }),
}

/// Messages sent from the feed state to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch one page of practices.
    FetchPage {
        request_id: u64,
        kind: FetchKind,
        credential: Credential,
        query: PageQuery,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Abort a fetch that is still running. Unknown ids are ignored.
    Cancel {
        request_id: u64,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::FetchPage { request_id, .. } | Self::Cancel { request_id, .. } => *request_id,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchPage { trace_context, .. } | Self::Cancel { trace_context, .. } => {
                trace_context.as_ref()
            }
        }
    }
}

/// Responses sent from the worker back to the feed state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A page arrived and its entries were paired with their thumbnails.
    PageLoaded {
        request_id: u64,
        kind: FetchKind,
        entries: Vec<FeedEntry>,
        total_items: u64,
        total_pages: u32,
    },

    /// The fetch failed. The message is for logging only.
    PageFailed {
        request_id: u64,
        kind: FetchKind,
        message: String,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::PageLoaded { request_id, .. } | Self::PageFailed { request_id, .. } => {
                *request_id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_context_round_trips_to_otel() {
        use opentelemetry::trace::TraceContextExt;

        let ctx = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };

        let otel = ctx.to_otel_context().unwrap();
        let span = otel.span();
        let span_context = span.span_context();
        assert!(span_context.is_remote());
        assert_eq!(format!("{:016x}", span_context.span_id()), ctx.parent_span_id);
    }

    #[test]
    fn invalid_trace_ids_yield_none() {
        let ctx = TraceContext {
            trace_id: "not-hex".to_string(),
            parent_span_id: "00f067aa0ba902b7".to_string(),
        };
        assert!(ctx.to_otel_context().is_none());
    }

    #[test]
    fn builders_without_subscriber_have_no_trace_context() {
        let message = WorkerMessage::cancel(9);
        assert_eq!(message.request_id(), 9);
        assert!(message.trace_context().is_none());
    }

    #[test]
    fn refresh_and_initial_replace() {
        assert!(FetchKind::Initial.replaces());
        assert!(FetchKind::Refresh.replaces());
        assert!(!FetchKind::More.replaces());
    }
}
