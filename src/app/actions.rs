//! Side effects requested by the event handler.
//!
//! The handler never talks to the worker, the navigator or the device directly;
//! it returns a `Vec<Action>` and the front-end executes them in order.

use crate::navigation::NavigationCommand;
use crate::worker::WorkerMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a fetch or cancel message to the background worker.
    PostToWorker(WorkerMessage),

    /// Changes the navigation stack.
    Navigate(NavigationCommand),

    /// Releases any orientation lock left behind by fullscreen playback.
    UnlockOrientations,
}
