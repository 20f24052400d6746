//! View model types representing renderable feed state.
//!
//! View models are computed from [`FeedState`](crate::app::FeedState) on every
//! render and consumed by the renderer. They carry display-ready strings only;
//! relative times in particular are produced here, never stored on entries.

/// Label of the retry trigger shown when the feed is empty.
pub const LOAD_PRACTICE_LABEL: &str = "Load practice";

/// Label of the footer button while it is idle.
pub const LOAD_MORE_LABEL: &str = "Load more";

/// Complete feed view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewModel {
    /// Entries inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected entry relative to `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Set when there is nothing to show and no initial load is running.
    pub empty_state: Option<EmptyState>,

    /// Initial load in progress; the list area shows a loading indicator.
    pub loading: bool,

    /// Pull-to-refresh in progress; the current entries stay visible.
    pub refreshing: bool,
}

/// One practice row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub practice_id: i64,
    pub title: String,
    pub username: String,
    pub thumbnail_url: String,

    /// Clock-style duration overlaid on the thumbnail, absent for no duration.
    pub duration: Option<String>,

    /// Abbreviated view count, e.g. `"1.5K"`.
    pub views: String,

    /// Relative age, e.g. `"3 days ago"`.
    pub elapsed: String,

    pub is_selected: bool,

    /// Character ranges of `title` matched by the active filter.
    pub title_highlights: Vec<(usize, usize)>,

    /// Character ranges of `username` matched by the active filter.
    pub username_highlights: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. `"Practices (12)"`.
    pub title: String,

    /// Active filter description, e.g. `"title: scales"`.
    pub filter: Option<String>,
}

/// The "Load more" footer button and status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Button label; `None` while the busy indicator replaces it.
    pub load_more_label: Option<&'static str>,

    /// Load-more in flight: the button is disabled and shows a busy indicator.
    pub busy: bool,

    /// Surfaced load-more failure, if the policy keeps one.
    pub error: Option<String>,

    /// Keybinding help text.
    pub keybindings: String,
}

/// Empty feed with its retry trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,

    /// Label of the button that re-runs the initial load.
    pub action_label: &'static str,
}
