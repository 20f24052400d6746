//! Terminal front-end and entry point.
//!
//! A thin host around the library: it owns the navigation stack, the
//! orientation lock and the fetch worker, feeds line-based commands and worker
//! responses into [`handle_event`], executes the returned actions and prints a
//! frame after every change.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  select! loop (main task)    │
//! │  ┌────────────────────────┐  │
//! │  │ FeedState, navigator,  │  │  ← event handling, rendering
//! │  │ orientation, playback  │  │
//! │  └────────────────────────┘  │
//! │     │ WorkerMessage   ▲      │
//! │     ▼                 │      │
//! │  ┌────────────────────────┐  │
//! │  │ FeedWorker (tokio)     │  │  ← one task per page fetch
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```text
//! practice-feed [CONFIG_FILE]
//! ```
//!
//! Without an argument the path in `PRACTICE_FEED_CONFIG` is used, and without
//! that the built-in defaults. `COLUMNS` and `LINES` set the frame size.
//!
//! # Commands
//!
//! Feed screen:
//! - `j` / `k`: Move down / up
//! - `o`: Open the selected practice
//! - `e`: Scroll to the end of the list
//! - `m`: Press "Load more"
//! - `r`: Pull to refresh
//! - `l`: Press "Load practice" on the empty state
//! - `f <title|username> <text>`: Filter; `f` alone clears it
//! - `x`: Dismiss the error line
//! - `c`: Open the camera
//!
//! Camera screen:
//! - `record <path>`: Finish a recording and play it back
//!
//! Playback screen:
//! - `play`, `pause`, `seek <seconds>`, `end`
//!
//! Anywhere:
//! - `back`: Hardware back button
//! - `q`: Quit

#![allow(clippy::multiple_crate_versions)]

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use practice_feed::api::PracticeApi;
use practice_feed::domain::FilterField;
use practice_feed::navigation::{
    decide_back_navigation, BackNavigation, Navigator, OrientationLock, PlaybackScreen, Route,
    StackNavigator, TrackedOrientation,
};
use practice_feed::worker::{spawn_worker, WorkerHandle, WorkerResponse};
use practice_feed::{handle_event, Action, Config, Event, FeedState, PracticeError, Result};

const CONFIG_ENV: &str = "PRACTICE_FEED_CONFIG";
const DEFAULT_COLS: usize = 80;
const DEFAULT_ROWS: usize = 24;

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Feed(Event),
    Play,
    Pause,
    Seek(Duration),
    End,
    Back,
    Quit,
}

/// Front-end state wrapper.
struct Host {
    feed: FeedState,
    navigator: StackNavigator,
    orientation: TrackedOrientation,
    playback: Option<PlaybackScreen>,
    worker: WorkerHandle,
    rows: usize,
    cols: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("practice-feed: {e}");
            return ExitCode::FAILURE;
        }
    };
    practice_feed::observability::init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "front-end stopped");
            eprintln!("practice-feed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<Config> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok().filter(|p| !p.trim().is_empty()));

    path.map_or_else(
        || Ok(Config::default()),
        |path| Config::from_file(practice_feed::infrastructure::expand_tilde(&path)),
    )
}

async fn run(config: Config) -> Result<()> {
    let span = tracing::debug_span!("front_end_start");
    let api = span.in_scope(|| {
        tracing::debug!(api_base_url = %config.api_base_url, "starting front-end");
        PracticeApi::new(config.api_base_url.clone())
    })?;

    let (worker, responses, worker_task) = spawn_worker(Arc::new(api));

    let mut host = Host {
        feed: practice_feed::initialize(&config),
        navigator: StackNavigator::default(),
        orientation: TrackedOrientation::default(),
        playback: None,
        worker,
        rows: terminal_dimension("LINES", DEFAULT_ROWS),
        cols: terminal_dimension("COLUMNS", DEFAULT_COLS),
    };

    host.dispatch(&Event::Mount);
    host.draw().await?;

    let result = host.event_loop(responses).await;

    host.dispatch(&Event::Unmount);
    drop(host);
    if let Err(e) = worker_task.await {
        tracing::debug!(error = %e, "worker task ended abnormally");
    }
    result
}

impl Host {
    async fn event_loop(&mut self, mut responses: UnboundedReceiver<WorkerResponse>) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let redraw = tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::debug!("stdin closed");
                        return Ok(());
                    };
                    match parse_command(&line) {
                        Some(Command::Quit) => return Ok(()),
                        Some(command) => self.execute_command(command),
                        None => {
                            tracing::debug!(line = %line, "unrecognized command");
                            false
                        }
                    }
                }
                response = responses.recv() => {
                    let Some(response) = response else {
                        return Err(PracticeError::Worker("worker stopped".to_string()));
                    };
                    self.dispatch(&Event::WorkerResponse(response))
                }
            };

            if redraw {
                self.draw().await?;
            }
        }
    }

    /// Runs a command against whichever screen is on top.
    fn execute_command(&mut self, command: Command) -> bool {
        let span = tracing::debug_span!("front_end_command", command = ?command);
        let _guard = span.entered();

        match (self.navigator.current().cloned(), command) {
            (_, Command::Back) => self.back_pressed(),
            (Some(Route::Play { .. }), command) => self.playback_command(command),
            (Some(Route::Camera), Command::Feed(event @ Event::RecordingFinished { .. })) => {
                self.dispatch(&event)
            }
            (Some(route), Command::Feed(event)) if is_feed_route(&route) => self.dispatch(&event),
            (route, command) => {
                tracing::debug!(route = ?route, command = ?command, "command not available here");
                false
            }
        }
    }

    fn playback_command(&mut self, command: Command) -> bool {
        let Some(screen) = self.playback.as_mut() else {
            return false;
        };
        match command {
            Command::Play => screen.play(),
            Command::Pause => screen.pause(),
            Command::Seek(position) => screen.on_progress(position),
            Command::End => screen.on_end(),
            Command::Feed(_) | Command::Back | Command::Quit => return false,
        }
        true
    }

    /// Hardware back button: playback decides for itself, other screens pop.
    fn back_pressed(&mut self) -> bool {
        let Some(screen) = self.playback.take() else {
            return self.navigator.go_back() && self.sync_screens();
        };

        screen.on_back_pressed(&mut self.navigator, &mut self.orientation);
        if decide_back_navigation(screen.video_uri()) == BackNavigation::ResetToRoot {
            self.dispatch(&Event::Unmount);
            self.dispatch(&Event::Mount);
        }
        self.sync_screens();
        true
    }

    /// Feeds one event to the state machine and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.feed, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                let navigated = actions.iter().any(|a| matches!(a, Action::Navigate(_)));
                for action in actions {
                    self.execute_action(action);
                }
                if navigated {
                    self.sync_screens();
                }
                should_render || navigated
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::PostToWorker(message) => {
                if let Err(e) = self.worker.post(message) {
                    tracing::warn!(error = %e, "failed to post worker message");
                }
            }
            Action::Navigate(command) => command.apply(&mut self.navigator),
            Action::UnlockOrientations => self.orientation.unlock_all_orientations(),
        }
    }

    /// Mounts or drops the playback screen to match the top route.
    fn sync_screens(&mut self) -> bool {
        match self.navigator.current() {
            Some(Route::Play { video_uri }) => {
                let already_playing = self
                    .playback
                    .as_ref()
                    .is_some_and(|screen| screen.video_uri() == video_uri);
                if !already_playing {
                    let video_uri = video_uri.clone();
                    self.playback = Some(PlaybackScreen::mount(video_uri, &mut self.orientation));
                }
            }
            _ => self.playback = None,
        }
        true
    }

    async fn draw(&self) -> Result<()> {
        let frame = match self.navigator.current() {
            Some(route) if is_feed_route(route) => {
                practice_feed::ui::render(&self.feed, Utc::now(), self.rows, self.cols)
            }
            Some(Route::Play { .. }) => self.playback.as_ref().map_or_else(String::new, |screen| {
                let state = screen.state();
                format!(
                    "▶ {}  {}  {}s  orientation: {:?}\n",
                    screen.video_uri(),
                    if state.paused { "paused" } else { "playing" },
                    state.position.as_secs(),
                    self.orientation.locked()
                )
            }),
            Some(route) => format!("[{}]  back: return\n", route.name()),
            None => String::new(),
        };

        let mut stdout = tokio::io::stdout();
        stdout.write_all(frame.as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

const fn is_feed_route(route: &Route) -> bool {
    matches!(route, Route::Tab | Route::Home)
}

fn terminal_dimension(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(default)
}

/// Maps an input line to a command. Unknown input yields `None`.
fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    Some(match (word, rest) {
        ("j", "") => Command::Feed(Event::KeyDown),
        ("k", "") => Command::Feed(Event::KeyUp),
        ("o", "") => Command::Feed(Event::SelectPractice),
        ("e", "") => Command::Feed(Event::EndReached),
        ("m", "") => Command::Feed(Event::LoadMorePressed),
        ("r", "") => Command::Feed(Event::Refresh),
        ("l", "") => Command::Feed(Event::RetryInitialLoad),
        ("x", "") => Command::Feed(Event::DismissError),
        ("c", "") => Command::Feed(Event::OpenCamera),
        ("f", "") => Command::Feed(Event::ApplyFilter {
            text: String::new(),
            field: FilterField::Title,
        }),
        ("f", args) => {
            let (field, text) = args.split_once(char::is_whitespace)?;
            Command::Feed(Event::ApplyFilter {
                text: text.trim().to_string(),
                field: field.parse().ok()?,
            })
        }
        ("record", path) if !path.is_empty() => Command::Feed(Event::RecordingFinished {
            path: path.to_string(),
        }),
        ("play", "") => Command::Play,
        ("pause", "") => Command::Pause,
        ("seek", secs) => Command::Seek(Duration::try_from_secs_f64(secs.parse().ok()?).ok()?),
        ("end", "") => Command::End,
        ("back", "") => Command::Back,
        ("q", "") => Command::Quit,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_filter_commands() {
        assert_eq!(
            parse_command("f username  mia k"),
            Some(Command::Feed(Event::ApplyFilter {
                text: "mia k".to_string(),
                field: FilterField::Username,
            }))
        );
        assert_eq!(
            parse_command("f"),
            Some(Command::Feed(Event::ApplyFilter {
                text: String::new(),
                field: FilterField::Title,
            }))
        );
        assert_eq!(parse_command("f views 10"), None);
        assert_eq!(parse_command("f title"), None);
    }

    #[test]
    fn parses_playback_commands() {
        assert_eq!(parse_command(" back "), Some(Command::Back));
        assert_eq!(parse_command("seek 1.5"), Some(Command::Seek(Duration::from_millis(1500))));
        assert_eq!(parse_command("seek -3"), None);
        assert_eq!(parse_command("seek 1e30"), None);
        assert_eq!(parse_command("seek NaN"), None);
        assert_eq!(
            parse_command("record /tmp/practice.mp4"),
            Some(Command::Feed(Event::RecordingFinished {
                path: "/tmp/practice.mp4".to_string()
            }))
        );
        assert_eq!(parse_command("record"), None);
        assert_eq!(parse_command("jj"), None);
    }
}
