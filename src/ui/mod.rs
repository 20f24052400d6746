//! Terminal rendering of the practice feed.
//!
//! ```text
//! FeedState → compute_viewmodel → FeedViewModel → render → ANSI frame
//! ```
//!
//! - [`format`]: Elapsed-time, duration and view-count formatters
//! - [`viewmodel`]: View model types representing renderable state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, padding)
//! - [`theme`]: Color schemes and ANSI escape generation

pub mod components;
pub mod format;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use theme::Theme;
pub use viewmodel::{DisplayItem, EmptyState, FeedViewModel, FooterInfo, HeaderInfo};
