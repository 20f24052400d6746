//! Fetch worker running page requests as tokio tasks.
//!
//! The feed state never awaits anything itself; it posts [`WorkerMessage`]s and
//! later receives [`WorkerResponse`]s as events. The worker spawns one task per
//! fetch and keeps its abort handle keyed by request id, which is what makes
//! cancellation on refresh and unmount possible.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::api::FeedSource;
use crate::domain::error::{PracticeError, Result};
use crate::domain::{Credential, FeedEntry, PageQuery};
use crate::worker::{FetchKind, WorkerMessage, WorkerResponse};

/// Background fetch worker.
pub struct FeedWorker {
    source: Arc<dyn FeedSource>,
    responses: UnboundedSender<WorkerResponse>,
    in_flight: HashMap<u64, AbortHandle>,
}

impl FeedWorker {
    #[must_use]
    pub fn new(source: Arc<dyn FeedSource>, responses: UnboundedSender<WorkerResponse>) -> Self {
        Self {
            source,
            responses,
            in_flight: HashMap::new(),
        }
    }

    /// Number of fetch tasks that have been spawned and not yet finished.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.values().filter(|h| !h.is_finished()).count()
    }

    /// Processes one message. Must be called from within a tokio runtime.
    pub fn handle_message(&mut self, message: WorkerMessage) {
        self.in_flight.retain(|_, handle| !handle.is_finished());

        let parent = message.trace_context().and_then(|ctx| ctx.to_otel_context());

        match message {
            WorkerMessage::FetchPage {
                request_id,
                kind,
                credential,
                query,
                ..
            } => {
                let span = tracing::debug_span!(
                    "worker_fetch_page",
                    request_id = request_id,
                    kind = ?kind,
                    page = query.page
                );
                if let Some(parent) = parent {
                    span.set_parent(parent);
                }

                let source = Arc::clone(&self.source);
                let responses = self.responses.clone();

                let task = tokio::spawn(
                    async move {
                        let response =
                            fetch_page(source.as_ref(), request_id, kind, &credential, &query)
                                .await;
                        if responses.send(response).is_err() {
                            tracing::debug!("response receiver dropped, discarding page");
                        }
                    }
                    .instrument(span),
                );

                self.in_flight.insert(request_id, task.abort_handle());
            }

            WorkerMessage::Cancel { request_id, .. } => {
                if let Some(handle) = self.in_flight.remove(&request_id) {
                    handle.abort();
                    tracing::debug!(request_id = request_id, "fetch cancelled");
                } else {
                    tracing::trace!(request_id = request_id, "cancel for unknown or finished fetch");
                }
            }
        }
    }

    /// Drains `messages` until every sender is dropped, then aborts whatever
    /// is still running.
    pub async fn run(mut self, mut messages: UnboundedReceiver<WorkerMessage>) {
        while let Some(message) = messages.recv().await {
            self.handle_message(message);
        }

        for (request_id, handle) in self.in_flight.drain() {
            tracing::debug!(request_id = request_id, "aborting fetch on worker shutdown");
            handle.abort();
        }
    }
}

/// Fetches and pairs one page, folding any failure into a response.
pub async fn fetch_page(
    source: &dyn FeedSource,
    request_id: u64,
    kind: FetchKind,
    credential: &Credential,
    query: &PageQuery,
) -> WorkerResponse {
    let result = load_entries(source, credential, query).await;
    handle_fetch_result(request_id, kind, result)
}

async fn load_entries(
    source: &dyn FeedSource,
    credential: &Credential,
    query: &PageQuery,
) -> Result<(Vec<FeedEntry>, u64, u32)> {
    let page = source.fetch_page(credential, query).await?;
    let total_items = page.total_items;
    let total_pages = page.total_pages;
    let entries = page.into_entries()?;
    Ok((entries, total_items, total_pages))
}

fn handle_fetch_result(
    request_id: u64,
    kind: FetchKind,
    result: Result<(Vec<FeedEntry>, u64, u32)>,
) -> WorkerResponse {
    match result {
        Ok((entries, total_items, total_pages)) => {
            tracing::debug!(
                request_id = request_id,
                entries = entries.len(),
                "page fetch successful"
            );
            WorkerResponse::PageLoaded {
                request_id,
                kind,
                entries,
                total_items,
                total_pages,
            }
        }
        Err(e) => {
            tracing::warn!(request_id = request_id, kind = ?kind, error = %e, "page fetch failed");
            WorkerResponse::PageFailed {
                request_id,
                kind,
                message: e.to_string(),
            }
        }
    }
}

/// Sending half used by the front-end to reach a running worker.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    messages: UnboundedSender<WorkerMessage>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::Worker`] if the worker task has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.messages
            .send(message)
            .map_err(|e| PracticeError::Worker(format!("worker stopped: {e}")))
    }
}

/// Spawns a worker on the current runtime.
///
/// Returns the handle for posting messages, the receiver on which responses
/// arrive, and the worker task itself.
#[must_use]
pub fn spawn_worker(
    source: Arc<dyn FeedSource>,
) -> (WorkerHandle, UnboundedReceiver<WorkerResponse>, JoinHandle<()>) {
    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let (response_tx, response_rx) = mpsc::unbounded_channel();

    let worker = FeedWorker::new(source, response_tx);
    let task = tokio::spawn(worker.run(message_rx));

    (WorkerHandle { messages: message_tx }, response_rx, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PracticePage;
    use futures_util::future::BoxFuture;
    use std::time::Duration;

    struct SlowSource;

    impl FeedSource for SlowSource {
        fn fetch_page<'a>(
            &'a self,
            _credential: &'a Credential,
            _query: &'a PageQuery,
        ) -> BoxFuture<'a, Result<PracticePage>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err::<PracticePage, _>(PracticeError::Worker("unreachable".to_string()))
            })
        }
    }

    struct MisalignedSource;

    impl FeedSource for MisalignedSource {
        fn fetch_page<'a>(
            &'a self,
            _credential: &'a Credential,
            _query: &'a PageQuery,
        ) -> BoxFuture<'a, Result<PracticePage>> {
            Box::pin(async {
                serde_json::from_str::<PracticePage>(
                    r#"{"practices": [{"_id": 1}], "thumbnailURLs": []}"#,
                )
                .map_err(PracticeError::from)
            })
        }
    }

    fn fetch(request_id: u64) -> WorkerMessage {
        WorkerMessage::fetch_page(
            request_id,
            FetchKind::More,
            Credential::new("t"),
            PageQuery::new(1, 10, None),
        )
    }

    #[tokio::test]
    async fn misaligned_page_is_reported_as_failure() {
        let response = fetch_page(
            &MisalignedSource,
            4,
            FetchKind::Initial,
            &Credential::new("t"),
            &PageQuery::new(0, 10, None),
        )
        .await;

        assert!(matches!(
            response,
            WorkerResponse::PageFailed {
                request_id: 4,
                kind: FetchKind::Initial,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn cancel_aborts_running_fetch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut worker = FeedWorker::new(Arc::new(SlowSource), tx);

        worker.handle_message(fetch(1));
        assert_eq!(worker.in_flight_count(), 1);

        worker.handle_message(WorkerMessage::cancel(1));
        tokio::task::yield_now().await;

        assert_eq!(worker.in_flight_count(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn cancel_of_unknown_request_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut worker = FeedWorker::new(Arc::new(SlowSource), tx);

        worker.handle_message(WorkerMessage::cancel(42));
        assert_eq!(worker.in_flight_count(), 0);
    }
}
