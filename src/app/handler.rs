//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place the feed state changes. It takes one
//! [`Event`], mutates [`FeedState`] and returns whether a redraw is needed plus
//! the actions the front-end must execute, in order.
//!
//! # Event Types
//!
//! - **Lifecycle**: `Mount`, `Unmount`
//! - **Loading**: `Refresh`, `EndReached`, `LoadMorePressed`, `RetryInitialLoad`, `ApplyFilter`
//! - **Navigation**: `KeyDown`, `KeyUp`, `SelectPractice`, `OpenCamera`, `RecordingFinished`
//! - **Worker**: `WorkerResponse`

use crate::app::{Action, FeedState};
use crate::domain::error::Result;
use crate::domain::{FeedFilter, FilterField};
use crate::navigation::{NavigationCommand, Route};
use crate::worker::{FetchKind, WorkerResponse};

/// Inputs to the feed state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The feed screen became visible.
    Mount,
    /// The feed screen went away; pending work is cancelled.
    Unmount,

    /// Pull-to-refresh: reload page 0 and reset pagination.
    Refresh,
    /// The list was scrolled to its end.
    EndReached,
    /// The footer "Load more" button was pressed.
    LoadMorePressed,
    /// The empty-state "Load practice" button was pressed.
    RetryInitialLoad,
    /// Sets or clears the text filter and reloads. Blank text clears it.
    ApplyFilter { text: String, field: FilterField },
    /// Clears a surfaced load-more error.
    DismissError,

    KeyDown,
    KeyUp,
    /// Opens the detail page of the selected practice.
    SelectPractice,
    /// Switches to the camera tab.
    OpenCamera,
    /// The camera finished writing a recording to `path`.
    RecordingFinished { path: String },

    /// Wraps a response from the fetch worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates state, and returns `(needs_render, actions)`.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the signature stable for events
/// that validate input.
///
/// # Example
///
/// ```
/// use practice_feed::app::{handle_event, Action, Event, FeedState};
/// use practice_feed::domain::Credential;
/// use practice_feed::ui::Theme;
///
/// let mut state = FeedState::new(Credential::new("token"), Theme::default());
/// let (render, actions) = handle_event(&mut state, &Event::Mount)?;
/// assert!(render);
/// assert_eq!(actions[0], Action::UnlockOrientations);
/// # Ok::<(), practice_feed::domain::PracticeError>(())
/// ```
pub fn handle_event(state: &mut FeedState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Mount => Ok((true, state.mount())),
        Event::Unmount => Ok((false, state.unmount())),

        Event::Refresh => Ok((true, state.begin_load(FetchKind::Refresh))),
        Event::RetryInitialLoad => Ok((true, state.begin_load(FetchKind::Initial))),
        Event::EndReached | Event::LoadMorePressed => {
            let action = state.begin_load_more();
            Ok((action.is_some(), action.into_iter().collect()))
        }
        Event::ApplyFilter { text, field } => {
            if !state.set_filter(FeedFilter::new(text, *field)) {
                tracing::debug!("filter unchanged, skipping reload");
                return Ok((false, vec![]));
            }
            Ok((true, state.begin_load(FetchKind::Initial)))
        }
        Event::DismissError => Ok((state.last_error.take().is_some(), vec![])),

        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::SelectPractice => {
            let Some(entry) = state.selected_entry() else {
                tracing::debug!("no practice selected");
                return Ok((false, vec![]));
            };

            let practice_id = entry.practice.id;
            tracing::debug!(practice_id = practice_id, "practice selected");

            Ok((
                false,
                vec![Action::Navigate(NavigationCommand::Navigate(
                    Route::ViewPractice { practice_id },
                ))],
            ))
        }
        Event::OpenCamera => Ok((
            false,
            vec![Action::Navigate(NavigationCommand::Navigate(Route::Camera))],
        )),
        Event::RecordingFinished { path } => {
            tracing::debug!(path = %path, "recording finished");
            Ok((
                false,
                vec![Action::Navigate(NavigationCommand::Navigate(Route::Play {
                    video_uri: path.clone(),
                }))],
            ))
        }

        Event::WorkerResponse(response) => Ok((state.apply_response(response), vec![])),
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Mount => "mount",
        Event::Unmount => "unmount",
        Event::Refresh => "refresh",
        Event::EndReached => "end_reached",
        Event::LoadMorePressed => "load_more_pressed",
        Event::RetryInitialLoad => "retry_initial_load",
        Event::ApplyFilter { .. } => "apply_filter",
        Event::DismissError => "dismiss_error",
        Event::KeyDown => "key_down",
        Event::KeyUp => "key_up",
        Event::SelectPractice => "select_practice",
        Event::OpenCamera => "open_camera",
        Event::RecordingFinished { .. } => "recording_finished",
        Event::WorkerResponse(_) => "worker_response",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;
    use crate::ui::Theme;
    use crate::worker::WorkerMessage;

    fn state() -> FeedState {
        FeedState::new(Credential::new("token"), Theme::default())
    }

    #[test]
    fn end_reached_twice_posts_once() {
        let mut state = state();
        handle_event(&mut state, &Event::Mount).unwrap();
        state.in_flight = None;

        let (_, first) = handle_event(&mut state, &Event::EndReached).unwrap();
        let (render, second) = handle_event(&mut state, &Event::LoadMorePressed).unwrap();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert!(!render);
    }

    #[test]
    fn blank_filter_on_unfiltered_feed_does_not_reload() {
        let mut state = state();
        handle_event(&mut state, &Event::Mount).unwrap();

        let (render, actions) = handle_event(
            &mut state,
            &Event::ApplyFilter {
                text: "   ".to_string(),
                field: FilterField::Title,
            },
        )
        .unwrap();

        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn filter_change_reloads_with_filter_parameter() {
        let mut state = state();
        handle_event(&mut state, &Event::Mount).unwrap();

        let (_, actions) = handle_event(
            &mut state,
            &Event::ApplyFilter {
                text: "mia".to_string(),
                field: FilterField::Username,
            },
        )
        .unwrap();

        assert!(matches!(actions[0], Action::PostToWorker(WorkerMessage::Cancel { .. })));
        match &actions[1] {
            Action::PostToWorker(WorkerMessage::FetchPage { query, .. }) => {
                assert_eq!(query.page, 0);
                assert_eq!(query.username.as_deref(), Some("mia"));
                assert_eq!(query.title, None);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn recording_finished_navigates_to_playback() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::RecordingFinished {
                path: "/data/cache/practice.mp4".to_string(),
            },
        )
        .unwrap();

        assert_eq!(
            actions,
            vec![Action::Navigate(NavigationCommand::Navigate(Route::Play {
                video_uri: "/data/cache/practice.mp4".to_string()
            }))]
        );
    }

    #[test]
    fn select_without_entries_does_nothing() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::SelectPractice).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }
}
