//! Document fetch trait.
//!
//! A fetcher turns a canonical article address into a status and raw markup.
//! It never retries and never interprets the status; deciding what a
//! non-success status means is the resolver's job.

use async_trait::async_trait;

use crate::error::Result;

/// A fetched page before parsing.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Address that was requested.
    pub url: String,

    /// HTTP status code.
    pub status: u16,

    /// Response body (markup on success, error page otherwise).
    pub body: String,
}

impl FetchedPage {
    /// Create a fetched page.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Successful status with a non-empty body.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status) && !self.body.trim().is_empty()
    }
}

/// Document fetch trait.
///
/// # Implementations
///
/// - `MediaWikiClient` - HTTP via reqwest
/// - `MockFetcher` - For testing
///
/// Transport failures (connection refused, timeouts) are errors; any
/// response that arrived, whatever its status, is `Ok`.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the document at `url`.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;

    /// Fetcher name for logging.
    fn name(&self) -> &str;
}
