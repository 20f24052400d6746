//! Fullscreen playback screen and its hardware back-button behavior.

use std::time::Duration;

use super::navigator::Navigator;
use super::orientation::OrientationLock;
use super::route::Route;

/// File name the camera screen writes fresh recordings to.
pub const PRACTICE_RECORDING_FILE: &str = "practice.mp4";

/// Where a back press on the playback screen leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackNavigation {
    /// Playing a just-recorded practice: drop the camera flow and return to the root.
    ResetToRoot,
    /// Any other video: pop one level.
    Pop,
}

/// Decides the back destination from the final path segment of `video_uri`.
///
/// ```
/// use practice_feed::navigation::{decide_back_navigation, BackNavigation};
///
/// assert_eq!(
///     decide_back_navigation("file:///data/recordings/practice.mp4"),
///     BackNavigation::ResetToRoot
/// );
/// assert_eq!(
///     decide_back_navigation("file:///data/recordings/session42.mp4"),
///     BackNavigation::Pop
/// );
/// ```
#[must_use]
pub fn decide_back_navigation(video_uri: &str) -> BackNavigation {
    let file_name = video_uri.rsplit('/').next().unwrap_or(video_uri);
    if file_name == PRACTICE_RECORDING_FILE {
        BackNavigation::ResetToRoot
    } else {
        BackNavigation::Pop
    }
}

/// Handles a hardware back press while `video_uri` is playing.
///
/// Releases the orientation lock before navigating. Always returns `true`:
/// the press is consumed and default back handling must not run.
pub fn handle_back_press(
    video_uri: &str,
    navigator: &mut dyn Navigator,
    orientation: &mut dyn OrientationLock,
) -> bool {
    orientation.unlock_all_orientations();

    let decision = decide_back_navigation(video_uri);
    tracing::debug!(video_uri = video_uri, decision = ?decision, "playback back press");

    match decision {
        BackNavigation::ResetToRoot => navigator.reset(Route::root()),
        BackNavigation::Pop => {
            navigator.go_back();
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    pub position: Duration,
    pub paused: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            paused: true,
        }
    }
}

/// Playback screen for a single video.
#[derive(Debug, Clone)]
pub struct PlaybackScreen {
    video_uri: String,
    state: PlaybackState,
}

impl PlaybackScreen {
    /// Mounts the screen paused at the start, pinned to landscape.
    pub fn mount(video_uri: impl Into<String>, orientation: &mut dyn OrientationLock) -> Self {
        orientation.lock_landscape();
        Self {
            video_uri: video_uri.into(),
            state: PlaybackState::default(),
        }
    }

    #[must_use]
    pub fn video_uri(&self) -> &str {
        &self.video_uri
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn play(&mut self) {
        self.state.paused = false;
    }

    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    pub fn on_progress(&mut self, position: Duration) {
        self.state.position = position;
    }

    /// Rewinds to the start and pauses.
    pub fn on_end(&mut self) {
        self.state = PlaybackState::default();
    }

    pub fn on_back_pressed(
        &self,
        navigator: &mut dyn Navigator,
        orientation: &mut dyn OrientationLock,
    ) -> bool {
        handle_back_press(&self.video_uri, navigator, orientation)
    }
}
