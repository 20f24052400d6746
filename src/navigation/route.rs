//! Screens reachable in the client and the parameters each one takes.

use serde::{Deserialize, Serialize};

/// A screen on the navigation stack together with its route parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params")]
pub enum Route {
    /// Bottom tab container; the root of the stack.
    Tab,
    /// Practice feed.
    Home,
    /// Camera capture.
    Camera,
    /// Fullscreen playback of a local or remote video file.
    Play {
        #[serde(rename = "videoUri")]
        video_uri: String,
    },
    /// Detail page of a single practice.
    ViewPractice {
        #[serde(rename = "practiceId")]
        practice_id: i64,
    },
}

impl Route {
    /// The route the stack starts from and is reset to.
    #[must_use]
    pub const fn root() -> Self {
        Self::Tab
    }

    /// Screen name as registered with the navigator.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Tab => "Tab",
            Self::Home => "Home",
            Self::Camera => "Camera",
            Self::Play { .. } => "Play",
            Self::ViewPractice { .. } => "ViewPractice",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_route_serializes_with_video_uri_param() {
        let route = Route::Play {
            video_uri: "file:///data/recordings/practice.mp4".to_string(),
        };
        let json = serde_json::to_value(&route).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Play",
                "params": {"videoUri": "file:///data/recordings/practice.mp4"}
            })
        );
        assert_eq!(route.name(), "Play");
    }
}
