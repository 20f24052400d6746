//! Screen routing, orientation locking and playback back-button handling.

pub mod navigator;
pub mod orientation;
pub mod playback;
pub mod route;

pub use navigator::{NavigationCommand, Navigator, StackNavigator};
pub use orientation::{Orientation, OrientationLock, TrackedOrientation};
pub use playback::{
    decide_back_navigation, handle_back_press, BackNavigation, PlaybackScreen, PlaybackState,
    PRACTICE_RECORDING_FILE,
};
pub use route::Route;
