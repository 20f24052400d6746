//! practice-feed: client core for browsing and replaying practice videos.
//!
//! The crate provides:
//! - A paginated practice feed with initial load, load-more, pull-to-refresh
//!   and filtering, fetched asynchronously through a cancellable worker
//! - Display formatting of each entry: relative age, clock-style duration and
//!   abbreviated view counts, recomputed on every render
//! - A navigation stack with the playback screen's back-button rule: a fresh
//!   recording returns to the root, any other video pops one level
//! - A terminal front-end (`main.rs`) driving all of the above
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Navigation    │
//! │ (ui/)         │   │ (worker/)     │   │ (navigation/) │
//! │ - Formatting  │   │ - Fetch tasks │   │ - Route stack │
//! │ - Rendering   │   │ - Cancellation│   │ - Orientation │
//! │ - Theming     │   │ - Trace links │   │ - Back press  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  API (api/), Domain (domain/), Infrastructure       │
//! │  - reqwest client for GET /practice                 │
//! │  - Practice model, credential, errors               │
//! │  - Data directory and path helpers                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - Rotating text log                                │
//! │  - File-exported OpenTelemetry spans                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! A TOML file (see [`Config::from_file`]) or a flat string map
//! ([`Config::from_map`]):
//!
//! ```toml
//! api_base_url = "https://api.example.com"
//! access_token = "eyJhbGciOi..."
//! page_size = 10
//! load_more_failure = "surface"
//! theme = "practice-light"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```
//! use practice_feed::{handle_event, initialize, Config, Event};
//!
//! let config = Config::default();
//! let mut state = initialize(&config);
//!
//! let (_render, actions) = handle_event(&mut state, &Event::Mount)?;
//! assert_eq!(actions.len(), 2); // unlock orientations, fetch page 0
//! # Ok::<(), practice_feed::PracticeError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod navigation;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, Event, FeedState, LoadMoreFailurePolicy};
pub use domain::{Credential, PracticeError, Result};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Backend used when no `api_base_url` is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the practice backend, without the `/practice` path.
    pub api_base_url: String,

    /// Bearer token sent with every request.
    pub access_token: Credential,

    /// Entries per page. Default: 10
    pub page_size: u32,

    /// What a failed load-more does. Default: `drop`
    pub load_more_failure: LoadMoreFailurePolicy,

    /// Built-in theme name: `practice-dark` or `practice-light`. Ignored if
    /// `theme_file` is set.
    pub theme: Option<String>,

    /// Path to a custom TOML theme. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing filter directives, e.g. `debug` or `practice_feed=trace`.
    /// `RUST_LOG` overrides it. Default: `"info"`
    pub trace_level: Option<String>,

    /// Where logs and span files go. Default: see [`infrastructure::get_data_dir`].
    pub data_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: Credential::default(),
            page_size: app::DEFAULT_PAGE_SIZE,
            load_more_failure: LoadMoreFailurePolicy::default(),
            theme: None,
            theme_file: None,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl Config {
    /// Parses a flat string map, falling back to defaults for anything
    /// missing or unparsable.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use practice_feed::{Config, LoadMoreFailurePolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("load_more_failure".to_string(), "surface".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.load_more_failure, LoadMoreFailurePolicy::Surface);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let page_size = config
            .get("page_size")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.page_size);

        let load_more_failure = config
            .get("load_more_failure")
            .and_then(|s| {
                s.parse::<LoadMoreFailurePolicy>()
                    .map_err(|e| tracing::debug!(error = %e, "ignoring load_more_failure"))
                    .ok()
            })
            .unwrap_or(defaults.load_more_failure);

        Self {
            api_base_url: non_empty("api_base_url").unwrap_or(defaults.api_base_url),
            access_token: non_empty("access_token").map_or(defaults.access_token, Credential::new),
            page_size,
            load_more_failure,
            theme: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
            data_dir: non_empty("data_dir"),
        }
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::Config`] for invalid TOML, unknown enum values
    /// or a zero page size.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| PracticeError::Config(format!("failed to parse config TOML: {e}")))?;

        if config.page_size == 0 {
            return Err(PracticeError::Config("page_size must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The configured data directory with `~` expanded, or the default one.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::get_data_dir, infrastructure::expand_tilde)
    }

    /// Loads the configured theme, falling back to the default on any error.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            });
        }

        self.theme.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the feed state for `config`: theme, credential, page size and
/// load-more failure policy. The feed is unmounted until [`Event::Mount`].
#[must_use]
pub fn initialize(config: &Config) -> FeedState {
    tracing::debug!(
        api_base_url = %config.api_base_url,
        page_size = config.page_size,
        load_more_failure = %config.load_more_failure,
        "initializing practice feed"
    );

    if config.access_token.is_empty() {
        tracing::warn!("no access_token configured, requests will be unauthenticated");
    }

    FeedState::new(config.access_token.clone(), config.load_theme())
        .with_page_size(config.page_size)
        .with_load_more_failure(config.load_more_failure)
}
