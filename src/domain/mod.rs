//! Domain layer for the practice feed client.
//!
//! Core types shared by every other layer, independent of the HTTP client, the
//! worker runtime and the terminal front-end.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`practice`]: Practice entries and the paged listing response
//! - [`query`]: Paging and filter parameters
//! - [`credential`]: Bearer credential passed explicitly to fetches

pub mod credential;
pub mod error;
pub mod practice;
pub mod query;

pub use credential::Credential;
pub use error::{PracticeError, Result};
pub use practice::{FeedEntry, Practice, PracticePage, PracticeUser};
pub use query::{FeedFilter, FilterField, PageQuery};
