//! Application layer coordinating state, events, and actions.
//!
//! Sits between the front-end (main.rs) and the domain/worker/navigation
//! layers. Data flows in one direction:
//!
//! ```text
//! Input → Event → handle_event → FeedState mutation → Actions → Side Effects
//!                      ↑                                     ↓
//!                      └──────── Worker Responses ───────────┘
//! ```
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Load-more failure policy and in-flight request record
//! - [`state`]: Feed state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InFlight, LoadMoreFailurePolicy};
pub use state::{FeedState, DEFAULT_PAGE_SIZE};
