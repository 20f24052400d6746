//! Feed source abstraction.
//!
//! The worker only needs "give me page N"; it does not care whether the page
//! comes from the HTTP backend or from a scripted source in tests. This trait is
//! that seam.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::domain::error::Result;
use crate::domain::{Credential, PageQuery, PracticePage};

/// Anything that can produce a page of practices.
///
/// # Implementations
///
/// - [`PracticeApi`](crate::api::PracticeApi): the HTTP backend
pub trait FeedSource: Send + Sync {
    /// Fetches the page described by `query` on behalf of `credential`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the source hit. The caller treats every failure
    /// the same way.
    fn fetch_page<'a>(
        &'a self,
        credential: &'a Credential,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<PracticePage>>;
}

impl<S: FeedSource + ?Sized> FeedSource for Arc<S> {
    fn fetch_page<'a>(
        &'a self,
        credential: &'a Credential,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<PracticePage>> {
        (**self).fetch_page(credential, query)
    }
}
