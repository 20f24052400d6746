//! Background worker for asynchronous page fetches.
//!
//! Page requests run as tokio tasks so the event loop keeps handling input while
//! a fetch is pending. Results come back as messages rather than return values,
//! which lets the feed state decide whether a late answer still matters.
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation, spawn helper and posting handle

pub mod handler;
pub mod messages;

pub use handler::{fetch_page, spawn_worker, FeedWorker, WorkerHandle};
pub use messages::{FetchKind, TraceContext, WorkerMessage, WorkerResponse};
