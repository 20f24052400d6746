//! Logging and OpenTelemetry tracing with file-based export.
//!
//! ```text
//! tracing macros ─┬─ fmt layer ───────────────→ practice-feed.log (rotating)
//!                 └─ tracing-opentelemetry → SDK → FileSpanExporter → practice-feed-spans.json (rotating)
//! ```
//!
//! Files live in the configured data directory and rotate at 10 MB with three
//! numbered backups. Worker tasks are parented to the event span that issued
//! their fetch through [`TraceContext`](crate::worker::TraceContext).
//!
//! - [`init`]: Subscriber setup and level resolution
//! - [`tracer`]: Tracer provider with the file span exporter
//! - [`span_formatter`]: Span to JSON line serialization
//! - [`file_writer`]: Rotating file writer and its `MakeWriter` adapter

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, LOG_FILE_NAME, TRACE_FILE_NAME};
