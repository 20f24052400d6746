//! Remote practice backend access.
//!
//! - `source`: the [`FeedSource`] trait the worker fetches through
//! - `client`: [`PracticeApi`], the reqwest implementation of it

pub mod client;
pub mod source;

pub use client::PracticeApi;
pub use source::FeedSource;
