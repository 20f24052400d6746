//! End-to-end feed flows: event handler, worker and a scripted source.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::sync::mpsc::UnboundedReceiver;

use practice_feed::api::FeedSource;
use practice_feed::domain::{Credential, FilterField, PageQuery, PracticePage};
use practice_feed::worker::{spawn_worker, WorkerHandle, WorkerResponse};
use practice_feed::{
    handle_event, Action, Event, FeedState, LoadMoreFailurePolicy, PracticeError, Result, Theme,
};

/// Serves pages built from `page_ids`, failing any page listed in `failing`.
struct ScriptedSource {
    pages: Vec<Vec<i64>>,
    failing: Vec<u32>,
    misaligned: Vec<u32>,
    seen: Mutex<Vec<PageQuery>>,
}

impl ScriptedSource {
    fn new(pages: Vec<Vec<i64>>) -> Self {
        Self {
            pages,
            failing: vec![],
            misaligned: vec![],
            seen: Mutex::new(vec![]),
        }
    }

    fn queries(&self) -> Vec<PageQuery> {
        self.seen.lock().unwrap().clone()
    }

    fn page(&self, index: u32) -> Result<PracticePage> {
        if self.failing.contains(&index) {
            return Err(PracticeError::Worker(format!("page {index} unavailable")));
        }
        let ids = self.pages.get(index as usize).cloned().unwrap_or_default();
        let mut thumbnails: Vec<String> = ids.iter().map(|id| format!("https://cdn/{id}.jpg")).collect();
        if self.misaligned.contains(&index) {
            thumbnails.pop();
        }

        let value = serde_json::json!({
            "totalItems": self.pages.iter().map(Vec::len).sum::<usize>(),
            "totalPages": self.pages.len(),
            "currentPage": index,
            "practices": ids
                .iter()
                .map(|id| serde_json::json!({"_id": id, "title": format!("Practice {id}"), "user": {"username": "mira"}}))
                .collect::<Vec<_>>(),
            "thumbnailURLs": thumbnails,
        });
        Ok(serde_json::from_value(value)?)
    }
}

impl FeedSource for ScriptedSource {
    fn fetch_page<'a>(
        &'a self,
        credential: &'a Credential,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<PracticePage>> {
        assert_eq!(credential.bearer(), "Bearer secret");
        self.seen.lock().unwrap().push(query.clone());
        Box::pin(async move { self.page(query.page) })
    }
}

struct Harness {
    state: FeedState,
    worker: WorkerHandle,
    responses: UnboundedReceiver<WorkerResponse>,
}

impl Harness {
    fn start(source: Arc<ScriptedSource>, policy: LoadMoreFailurePolicy) -> Self {
        let (worker, responses, _task) = spawn_worker(source);
        let state = FeedState::new(Credential::new("secret"), Theme::default())
            .with_page_size(2)
            .with_load_more_failure(policy);
        Self {
            state,
            worker,
            responses,
        }
    }

    fn send(&mut self, event: Event) -> Vec<Action> {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in &actions {
            if let Action::PostToWorker(message) = action {
                self.worker.post(message.clone()).unwrap();
            }
        }
        actions
    }

    async fn settle(&mut self) {
        let response = tokio::time::timeout(Duration::from_secs(5), self.responses.recv())
            .await
            .expect("worker answered")
            .expect("worker alive");
        self.send(Event::WorkerResponse(response));
    }

    fn ids(&self) -> Vec<i64> {
        self.state.entries.iter().map(|e| e.practice.id).collect()
    }
}

#[tokio::test]
async fn paginates_then_refresh_starts_over() {
    let source = Arc::new(ScriptedSource::new(vec![vec![1, 2], vec![3, 4], vec![5]]));
    let mut h = Harness::start(Arc::clone(&source), LoadMoreFailurePolicy::Drop);

    h.send(Event::Mount);
    h.settle().await;
    assert_eq!(h.ids(), vec![1, 2]);
    assert_eq!(h.state.next_page, 1);
    assert_eq!(h.state.total_items, 5);

    h.send(Event::EndReached);
    h.settle().await;
    h.send(Event::LoadMorePressed);
    h.settle().await;
    assert_eq!(h.ids(), vec![1, 2, 3, 4, 5]);
    assert_eq!(h.state.next_page, 3);
    assert_eq!(h.state.entries[4].thumbnail_url, "https://cdn/5.jpg");

    h.send(Event::Refresh);
    assert!(h.state.refreshing);
    h.settle().await;
    assert!(!h.state.refreshing);
    assert_eq!(h.ids(), vec![1, 2]);
    assert_eq!(h.state.next_page, 1);

    let pages: Vec<u32> = source.queries().iter().map(|q| q.page).collect();
    assert_eq!(pages, vec![0, 1, 2, 0]);
    assert!(source.queries().iter().all(|q| q.size == 2));
}

#[tokio::test]
async fn filter_reloads_from_first_page() {
    let source = Arc::new(ScriptedSource::new(vec![vec![1, 2], vec![3]]));
    let mut h = Harness::start(Arc::clone(&source), LoadMoreFailurePolicy::Drop);

    h.send(Event::Mount);
    h.settle().await;
    h.send(Event::EndReached);
    h.settle().await;

    h.send(Event::ApplyFilter {
        text: "scales".to_string(),
        field: FilterField::Title,
    });
    h.settle().await;

    assert_eq!(h.ids(), vec![1, 2]);
    let last = source.queries().pop().unwrap();
    assert_eq!(last.page, 0);
    assert_eq!(last.title.as_deref(), Some("scales"));
    assert_eq!(last.username, None);
}

#[tokio::test]
async fn misaligned_page_leaves_feed_untouched() {
    let mut source = ScriptedSource::new(vec![vec![1, 2], vec![3, 4]]);
    source.misaligned = vec![1];
    let mut h = Harness::start(Arc::new(source), LoadMoreFailurePolicy::Drop);

    h.send(Event::Mount);
    h.settle().await;
    h.send(Event::EndReached);
    h.settle().await;

    assert_eq!(h.ids(), vec![1, 2]);
    assert_eq!(h.state.next_page, 1);
    assert!(!h.state.fetching_more);
    assert_eq!(h.state.last_error, None);
}

#[tokio::test]
async fn surfaced_load_more_failure_can_be_retried() {
    let mut source = ScriptedSource::new(vec![vec![1, 2], vec![3]]);
    source.failing = vec![1];
    let mut h = Harness::start(Arc::new(source), LoadMoreFailurePolicy::Surface);

    h.send(Event::Mount);
    h.settle().await;
    h.send(Event::LoadMorePressed);
    h.settle().await;

    assert_eq!(h.ids(), vec![1, 2]);
    assert!(h
        .state
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("page 1 unavailable")));

    h.send(Event::DismissError);
    assert_eq!(h.state.last_error, None);
}

#[tokio::test]
async fn superseded_response_is_ignored() {
    let source = Arc::new(ScriptedSource::new(vec![vec![1, 2], vec![3]]));
    let mut h = Harness::start(source, LoadMoreFailurePolicy::Drop);

    h.send(Event::Mount);
    h.settle().await;

    let stale = WorkerResponse::PageLoaded {
        request_id: 0,
        kind: practice_feed::worker::FetchKind::More,
        entries: h.state.entries.clone(),
        total_items: 99,
        total_pages: 99,
    };
    let (render, _) = handle_event(&mut h.state, &Event::WorkerResponse(stale)).unwrap();

    assert!(!render);
    assert_eq!(h.ids(), vec![1, 2]);
    assert_eq!(h.state.total_items, 3);
}

#[tokio::test]
async fn unmount_discards_feed_and_late_answers() {
    let source = Arc::new(ScriptedSource::new(vec![vec![1, 2]]));
    let mut h = Harness::start(source, LoadMoreFailurePolicy::Drop);

    h.send(Event::Mount);
    let response = tokio::time::timeout(Duration::from_secs(5), h.responses.recv())
        .await
        .unwrap()
        .unwrap();

    h.send(Event::Unmount);
    let (render, _) = handle_event(&mut h.state, &Event::WorkerResponse(response)).unwrap();

    assert!(!render);
    assert!(h.state.entries.is_empty());
    assert!(!h.state.is_busy());
}
