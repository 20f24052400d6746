//! Feed state and view model computation.
//!
//! [`FeedState`] is the single source of truth for the home feed: the loaded
//! entries, pagination, busy flags, the request currently awaited, the active
//! filter and the selection cursor. It is mutated only by the event handler
//! and never awaits anything. Fetches are requested by returning actions and
//! their results come back through [`FeedState::apply_response`].
//!
//! # Request bookkeeping
//!
//! At most one request is awaited at a time. A load-more trigger while any
//! request is pending is ignored. An initial load or refresh cancels whatever
//! is pending and takes its place; the cancelled request's id no longer
//! matches, so a late answer to it is dropped.

use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

use super::modes::{InFlight, LoadMoreFailurePolicy};
use super::Action;
use crate::domain::{Credential, FeedEntry, FeedFilter, FilterField, PageQuery};
use crate::ui::components::FILTER_BOX_ROWS;
use crate::ui::format::{abbreviate_count, elapsed_text, format_duration};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DisplayItem, EmptyState, FeedViewModel, FooterInfo, HeaderInfo, LOAD_MORE_LABEL,
    LOAD_PRACTICE_LABEL,
};
use crate::worker::{FetchKind, WorkerMessage, WorkerResponse};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Rows taken by header, borders and footer around the list.
const CHROME_ROWS: usize = 7;

/// State of the practice feed screen.
#[derive(Debug, Clone)]
pub struct FeedState {
    /// Loaded entries, each paired with its thumbnail, in server order.
    pub entries: Vec<FeedEntry>,

    /// Page index the next load-more requests.
    pub next_page: u32,

    /// Totals reported by the last successful page.
    pub total_items: u64,
    pub total_pages: u32,

    /// Initial load in progress.
    pub loading: bool,

    /// Pull-to-refresh in progress.
    pub refreshing: bool,

    /// Load-more in progress.
    pub fetching_more: bool,

    /// Request whose response is still awaited.
    pub in_flight: Option<InFlight>,

    pub filter: Option<FeedFilter>,

    /// Zero-based cursor into `entries`.
    pub selected_index: usize,

    /// Load-more failure kept for display under [`LoadMoreFailurePolicy::Surface`].
    pub last_error: Option<String>,

    /// Whether the feed screen is on screen. Responses arriving while
    /// unmounted are ignored.
    pub mounted: bool,

    pub theme: Theme,

    credential: Credential,
    page_size: u32,
    load_more_failure: LoadMoreFailurePolicy,
    next_request_id: u64,
}

impl FeedState {
    #[must_use]
    pub fn new(credential: Credential, theme: Theme) -> Self {
        Self {
            entries: Vec::new(),
            next_page: 0,
            total_items: 0,
            total_pages: 0,
            loading: false,
            refreshing: false,
            fetching_more: false,
            in_flight: None,
            filter: None,
            selected_index: 0,
            last_error: None,
            mounted: false,
            theme,
            credential,
            page_size: DEFAULT_PAGE_SIZE,
            load_more_failure: LoadMoreFailurePolicy::default(),
            next_request_id: 1,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub const fn with_load_more_failure(mut self, policy: LoadMoreFailurePolicy) -> Self {
        self.load_more_failure = policy;
        self
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn load_more_failure(&self) -> LoadMoreFailurePolicy {
        self.load_more_failure
    }

    /// Whether any request is awaited.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Marks the screen mounted and starts the initial load.
    pub fn mount(&mut self) -> Vec<Action> {
        self.mounted = true;
        let mut actions = vec![Action::UnlockOrientations];
        actions.extend(self.begin_load(FetchKind::Initial));
        actions
    }

    /// Cancels the pending request and discards the feed.
    pub fn unmount(&mut self) -> Vec<Action> {
        let actions: Vec<Action> = self.cancel_in_flight().into_iter().collect();

        self.mounted = false;
        self.clear_entries();
        self.loading = false;
        self.refreshing = false;
        self.fetching_more = false;
        self.last_error = None;

        actions
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.next_page = 0;
        self.total_items = 0;
        self.total_pages = 0;
        self.selected_index = 0;
    }

    /// Requests page 0, replacing the feed when it arrives.
    ///
    /// `kind` is [`FetchKind::Initial`] for mount, retry and filter changes and
    /// [`FetchKind::Refresh`] for pull-to-refresh. A pending request of any
    /// kind is cancelled first. An initial load starts from an empty feed, so
    /// a failure leaves nothing from a previous filter on screen; a refresh
    /// keeps the current entries until the new page arrives.
    pub fn begin_load(&mut self, kind: FetchKind) -> Vec<Action> {
        debug_assert!(kind.replaces());

        if !self.mounted {
            tracing::debug!(kind = ?kind, "feed not mounted, load ignored");
            return vec![];
        }

        let mut actions: Vec<Action> = self.cancel_in_flight().into_iter().collect();

        match kind {
            FetchKind::Refresh => self.refreshing = true,
            _ => {
                self.loading = true;
                self.clear_entries();
            }
        }
        self.fetching_more = false;
        self.last_error = None;

        actions.push(self.issue(kind, 0));
        actions
    }

    /// Requests the next page unless a request is already pending.
    pub fn begin_load_more(&mut self) -> Option<Action> {
        if !self.mounted {
            tracing::debug!("feed not mounted, load-more ignored");
            return None;
        }

        if let Some(in_flight) = self.in_flight {
            tracing::debug!(
                pending_request = in_flight.request_id,
                pending_kind = ?in_flight.kind,
                "request in flight, load-more dropped"
            );
            return None;
        }

        self.fetching_more = true;
        self.last_error = None;

        Some(self.issue(FetchKind::More, self.next_page))
    }

    fn issue(&mut self, kind: FetchKind, page: u32) -> Action {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(InFlight { request_id, kind });

        let query = PageQuery::new(page, self.page_size, self.filter.as_ref());

        tracing::debug!(
            request_id = request_id,
            kind = ?kind,
            page = page,
            size = self.page_size,
            filtered = self.filter.is_some(),
            "requesting page"
        );

        Action::PostToWorker(WorkerMessage::fetch_page(
            request_id,
            kind,
            self.credential.clone(),
            query,
        ))
    }

    fn cancel_in_flight(&mut self) -> Option<Action> {
        let in_flight = self.in_flight.take()?;
        tracing::debug!(
            request_id = in_flight.request_id,
            kind = ?in_flight.kind,
            "cancelling pending request"
        );

        self.loading = false;
        self.refreshing = false;
        self.fetching_more = false;

        Some(Action::PostToWorker(WorkerMessage::cancel(in_flight.request_id)))
    }

    /// Applies a worker response. Returns whether the screen needs a redraw.
    ///
    /// Responses for a request other than the pending one, or arriving after
    /// unmount, change nothing.
    pub fn apply_response(&mut self, response: &WorkerResponse) -> bool {
        let request_id = response.request_id();

        if !self.mounted {
            tracing::debug!(request_id = request_id, "response after unmount ignored");
            return false;
        }

        match self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => {}
            other => {
                tracing::debug!(
                    request_id = request_id,
                    awaited = other.map(|f| f.request_id),
                    "stale response ignored"
                );
                return false;
            }
        }
        self.in_flight = None;

        match response {
            WorkerResponse::PageLoaded {
                kind,
                entries,
                total_items,
                total_pages,
                ..
            } => {
                self.total_items = *total_items;
                self.total_pages = *total_pages;

                if kind.replaces() {
                    self.entries.clone_from(entries);
                    self.next_page = 1;
                    self.selected_index = 0;
                    self.loading = false;
                    self.refreshing = false;
                } else {
                    self.entries.extend(entries.iter().cloned());
                    self.next_page += 1;
                    self.fetching_more = false;
                }

                tracing::debug!(
                    kind = ?kind,
                    received = entries.len(),
                    total = self.entries.len(),
                    next_page = self.next_page,
                    "page applied"
                );
            }
            WorkerResponse::PageFailed { kind, message, .. } => {
                if kind.replaces() {
                    self.loading = false;
                    self.refreshing = false;
                    tracing::warn!(kind = ?kind, error = %message, "feed load failed");
                } else {
                    self.fetching_more = false;
                    tracing::warn!(
                        page = self.next_page,
                        error = %message,
                        policy = %self.load_more_failure,
                        "load-more failed"
                    );
                    if self.load_more_failure == LoadMoreFailurePolicy::Surface {
                        self.last_error = Some(message.clone());
                    }
                }
            }
        }

        true
    }

    /// Replaces the filter. Returns `false` when it is unchanged.
    pub fn set_filter(&mut self, filter: Option<FeedFilter>) -> bool {
        if self.filter == filter {
            return false;
        }
        tracing::debug!(filter = ?filter, "filter changed");
        self.filter = filter;
        true
    }

    pub fn move_selection_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.entries.len();
    }

    pub fn move_selection_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.entries.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&FeedEntry> {
        self.entries.get(self.selected_index)
    }

    /// Computes the view model for a screen of `rows` lines at time `now`.
    ///
    /// The list is windowed around the selection the same way regardless of
    /// whether a filter is active. Relative times are derived from `now`, so
    /// rendering twice a minute apart gives different text for the same entry.
    #[must_use]
    pub fn compute_viewmodel(&self, now: DateTime<Utc>, rows: usize) -> FeedViewModel {
        let header = self.compute_header();
        let footer = self.compute_footer();

        if self.entries.is_empty() {
            let empty_state = (!self.loading && !self.refreshing).then(|| EmptyState {
                message: if self.filter.is_some() {
                    "No practices match the filter".to_string()
                } else {
                    "No practices yet".to_string()
                },
                action_label: LOAD_PRACTICE_LABEL,
            });

            return FeedViewModel {
                display_items: vec![],
                selected_index: 0,
                header,
                footer,
                empty_state,
                loading: self.loading,
                refreshing: self.refreshing,
            };
        }

        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.entries.len());
        if visible_end - visible_start < available_rows && self.entries.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = self.filter.as_ref().map(|_| SkimMatcherV2::default());

        let display_items = self.entries[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, entry)| {
                self.compute_display_item(entry, visible_start + offset, now, matcher.as_ref())
            })
            .collect();

        FeedViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header,
            footer,
            empty_state: None,
            loading: self.loading,
            refreshing: self.refreshing,
        }
    }

    fn compute_display_item(
        &self,
        entry: &FeedEntry,
        absolute_idx: usize,
        now: DateTime<Utc>,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let practice = &entry.practice;
        let title = practice.display_title().to_string();
        let username = practice.username().to_string();

        let (title_highlights, username_highlights) = match (matcher, &self.filter) {
            (Some(m), Some(filter)) => match filter.field {
                FilterField::Title => (highlight_ranges(m, &title, &filter.text), vec![]),
                FilterField::Username => (vec![], highlight_ranges(m, &username, &filter.text)),
            },
            _ => (vec![], vec![]),
        };

        DisplayItem {
            practice_id: practice.id,
            title,
            username,
            thumbnail_url: entry.thumbnail_url.clone(),
            duration: format_duration(practice.duration),
            views: abbreviate_count(practice.views),
            elapsed: elapsed_text(practice.created_at, now),
            is_selected: absolute_idx == self.selected_index,
            title_highlights,
            username_highlights,
        }
    }

    /// Rows left for the list after header, borders, footer, and the filter
    /// box and error line when shown.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = CHROME_ROWS;
        if self.filter.is_some() {
            chrome += FILTER_BOX_ROWS;
        }
        if self.last_error.is_some() {
            chrome += 1;
        }
        total_rows.saturating_sub(chrome).max(1)
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = if self.total_items > 0 {
            self.total_items
        } else {
            self.entries.len() as u64
        };

        HeaderInfo {
            title: format!(" Practices ({count}) "),
            filter: self
                .filter
                .as_ref()
                .map(|f| format!("{}: {}", f.field, f.text)),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.entries.is_empty() {
            "l: load practice  f: filter  c: camera  q: quit"
        } else {
            "j/k: navigate  o: open  m: load more  r: refresh  f: filter  x: dismiss  c: camera  q: quit"
        };

        FooterInfo {
            load_more_label: (!self.fetching_more).then_some(LOAD_MORE_LABEL),
            busy: self.fetching_more,
            error: self.last_error.clone(),
            keybindings: keybindings.to_string(),
        }
    }
}

/// Fuzzy-matched character positions of `pattern` in `text`, coalesced into
/// `(start, end)` ranges with exclusive end.
fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, pattern: &str) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, pattern) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}
