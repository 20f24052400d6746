//! Top-level rendering coordinator.
//!
//! Computes the view model from [`FeedState`] and lays out one frame:
//!
//! ```text
//! FeedState → compute_viewmodel(now) → FeedViewModel → render_viewmodel → frame
//! ```

use chrono::{DateTime, Utc};

use crate::app::FeedState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FeedViewModel;

/// Clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders a full frame for `state` as of `now`.
///
/// The returned string contains ANSI escapes only; the caller writes it to the
/// terminal in one piece.
#[must_use]
pub fn render(state: &FeedState, now: DateTime<Utc>, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(now, rows);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a precomputed view model: loading indicator, empty state with
/// its retry button, or the practice table.
#[must_use]
pub fn render_viewmodel(vm: &FeedViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::from(CLEAR_SCREEN);

    if (vm.loading || vm.refreshing) && vm.display_items.is_empty() {
        components::render_frame(&mut out, vm, theme, cols, rows);
        components::render_loading(&mut out, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        components::render_frame(&mut out, vm, theme, cols, rows);
        components::render_empty_state(&mut out, empty, theme, cols);
    } else {
        components::render_feed(&mut out, vm, theme, cols, rows);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;
    use crate::ui::viewmodel::LOAD_PRACTICE_LABEL;

    #[test]
    fn empty_feed_renders_retry_button() {
        let mut state = FeedState::new(Credential::new("t"), Theme::default());
        state.mounted = true;

        let frame = render(&state, Utc::now(), 24, 80);
        assert!(frame.contains(LOAD_PRACTICE_LABEL));
        assert!(frame.contains("Practices (0)"));
    }

    #[test]
    fn loading_feed_shows_indicator_instead_of_retry() {
        let mut state = FeedState::new(Credential::new("t"), Theme::default());
        let _ = state.mount();

        let frame = render(&state, Utc::now(), 24, 80);
        assert!(frame.contains("Loading practices..."));
        assert!(!frame.contains(LOAD_PRACTICE_LABEL));
    }

    #[test]
    fn refresh_over_pending_initial_load_shows_indicator() {
        let mut state = FeedState::new(Credential::new("t"), Theme::default());
        let _ = state.mount();
        let _ = state.begin_load(crate::worker::FetchKind::Refresh);

        let frame = render(&state, Utc::now(), 24, 80);
        assert!(frame.contains("Loading practices..."));
        assert!(!frame.contains(LOAD_PRACTICE_LABEL));
    }
}
