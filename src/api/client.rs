//! HTTP client for the practice backend.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};

use crate::api::source::FeedSource;
use crate::domain::error::{PracticeError, Result};
use crate::domain::{Credential, PageQuery, PracticePage};
use futures_util::future::BoxFuture;

/// Request timeout for listing calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Async API client for the practice listing endpoint.
#[derive(Debug, Clone)]
pub struct PracticeApi {
    base_url: String,
    http: Client,
}

impl PracticeApi {
    /// Create a new client targeting the provided base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Returns the base URL configured for this client.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches one page from `GET /practice`.
    ///
    /// # Errors
    ///
    /// Returns [`PracticeError::Http`] for transport failures,
    /// [`PracticeError::UnexpectedStatus`] for non-2xx answers and
    /// [`PracticeError::Decode`] when the body is not a practice page.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            page = query.page,
            size = query.size,
            filtered = query.title.is_some() || query.username.is_some()
        )
    )]
    pub async fn list_practices(
        &self,
        credential: &Credential,
        query: &PageQuery,
    ) -> Result<PracticePage> {
        let response = self.list_request(credential, query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PracticeError::UnexpectedStatus { status, body });
        }

        let bytes = response.bytes().await?;
        let page: PracticePage = serde_json::from_slice(&bytes)?;

        tracing::debug!(
            practices = page.practices.len(),
            thumbnails = page.thumbnail_urls.len(),
            total_items = page.total_items,
            "practice page received"
        );
        Ok(page)
    }

    fn list_request(&self, credential: &Credential, query: &PageQuery) -> RequestBuilder {
        self.http
            .get(format!("{}/practice", self.base_url))
            .header(AUTHORIZATION, credential.bearer())
            .query(query)
    }
}

impl FeedSource for PracticeApi {
    fn fetch_page<'a>(
        &'a self,
        credential: &'a Credential,
        query: &'a PageQuery,
    ) -> BoxFuture<'a, Result<PracticePage>> {
        Box::pin(self.list_practices(credential, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeedFilter, FilterField};

    #[test]
    fn trims_trailing_slash() {
        let api = PracticeApi::new("https://api.example.com/v1/").unwrap();
        assert_eq!(api.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn list_request_carries_bearer_and_query() {
        let api = PracticeApi::new("https://api.example.com").unwrap();
        let filter = FeedFilter::new("scales", FilterField::Title);
        let query = PageQuery::new(1, 10, filter.as_ref());

        let request = api
            .list_request(&Credential::new("token-123"), &query)
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/practice");
        assert_eq!(request.url().query(), Some("page=1&size=10&title=scales"));
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer token-123"
        );
    }
}
