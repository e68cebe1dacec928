//! HTTP client for MediaWiki sites.
//!
//! One reqwest client serves both collaborators: direct article fetches and
//! the `list=search` API used for fuzzy correction.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ResearchError, Result};
use crate::traits::fetcher::{DocumentFetcher, FetchedPage};
use crate::traits::searcher::{SearchHit, Searcher};
use crate::types::config::WikiConfig;

/// MediaWiki client built from a `WikiConfig`.
///
/// # Example
///
/// ```rust,ignore
/// use wiki_research::{MediaWikiClient, WikiConfig};
///
/// let client = MediaWikiClient::new(WikiConfig::default())?;
/// let page = client.fetch("https://en.wikipedia.org/wiki/Dog").await?;
/// let hits = client.search("doog").await?;
/// ```
#[derive(Clone)]
pub struct MediaWikiClient {
    client: reqwest::Client,
    config: WikiConfig,
}

impl MediaWikiClient {
    /// Create a client; the config's timeout and user agent apply to every request.
    pub fn new(config: WikiConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ResearchError::Http(Box::new(e)))?;

        Ok(Self { client, config })
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The config this client was built from.
    pub fn config(&self) -> &WikiConfig {
        &self.config
    }
}

#[async_trait]
impl DocumentFetcher for MediaWikiClient {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            ResearchError::from_reqwest(url, e)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResearchError::from_reqwest(url, e))?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "HTTP fetch finished");
        Ok(FetchedPage::new(url, status.as_u16(), body))
    }

    fn name(&self) -> &str {
        "mediawiki"
    }
}

#[async_trait]
impl Searcher for MediaWikiClient {
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        let search_failed = |reason: String| ResearchError::Search {
            term: term.to_string(),
            reason,
        };

        debug!(term = %term, api = %self.config.api_url, "Searching");
        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", term),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| search_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(search_failed(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| search_failed(e.to_string()))?;

        parse_search_response(&body).map_err(|e| search_failed(e.to_string()))
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: Option<SearchQuery>,
}

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchEntry>,
}

#[derive(Deserialize)]
struct SearchEntry {
    title: String,
    pageid: Option<u64>,
    snippet: Option<String>,
}

/// Decode a `list=search` response body; a missing `query` block means no hits.
pub fn parse_search_response(body: &str) -> serde_json::Result<Vec<SearchHit>> {
    let response: SearchResponse = serde_json::from_str(body)?;

    Ok(response
        .query
        .map(|q| q.search)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            let mut hit = SearchHit::new(entry.title);
            if let Some(id) = entry.pageid {
                hit = hit.with_page_id(id);
            }
            if let Some(snippet) = entry.snippet {
                hit = hit.with_snippet(snippet);
            }
            hit
        })
        .collect())
}
