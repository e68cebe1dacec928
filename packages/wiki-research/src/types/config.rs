//! Configuration for talking to the encyclopedia.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ResearchError, Result};

/// Connection and fan-out settings injected into the fetcher and pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiConfig {
    /// Site root that internal hrefs are joined onto.
    ///
    /// Default: `https://en.wikipedia.org`.
    pub base_url: String,

    /// Article namespace marker, both as href prefix and URL path segment.
    ///
    /// Default: `/wiki/`.
    pub article_path: String,

    /// Search API endpoint (MediaWiki `api.php`).
    pub api_url: String,

    /// User agent sent with every request.
    pub user_agent: String,

    /// Per-request timeout for fetches and searches.
    ///
    /// Default: 10 seconds.
    pub request_timeout: Duration,

    /// Time budget for resolving and extracting one related article.
    ///
    /// Default: 30 seconds.
    pub related_timeout: Duration,

    /// Upper bound on related articles fetched at once.
    ///
    /// The effective pool is `min(limit, max_concurrency)`. Default: 8.
    pub max_concurrency: usize,

    /// Treat a missing content container as `MalformedDocument`.
    ///
    /// Default: false (extraction degrades to empty results).
    pub require_content: bool,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            article_path: "/wiki/".to_string(),
            api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: format!("WikiResearchBot/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(10),
            related_timeout: Duration::from_secs(30),
            max_concurrency: 8,
            require_content: false,
        }
    }
}

impl WikiConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the site root, e.g. `https://de.wikipedia.org`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the search API endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the per-related-article time budget.
    pub fn with_related_timeout(mut self, timeout: Duration) -> Self {
        self.related_timeout = timeout;
        self
    }

    /// Set the fan-out bound.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    /// Require the content container to be present.
    pub fn with_require_content(mut self, require: bool) -> Self {
        self.require_content = require;
        self
    }

    /// Direct address of an article from its canonical title.
    pub fn article_url(&self, canonical_title: &str) -> String {
        format!("{}{}{}", self.base_url, self.article_path, canonical_title)
    }

    /// Check the settings before building clients from them.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(invalid("base_url must not be empty"));
        }
        if self.api_url.is_empty() {
            return Err(invalid("api_url must not be empty"));
        }
        for (name, value) in [("base_url", &self.base_url), ("api_url", &self.api_url)] {
            if let Err(e) = url::Url::parse(value) {
                return Err(invalid(&format!("{} '{}' is not a valid URL: {}", name, value, e)));
            }
        }
        if !self.article_path.starts_with('/') || !self.article_path.ends_with('/') {
            return Err(invalid("article_path must start and end with '/'"));
        }
        if self.request_timeout.is_zero() || self.related_timeout.is_zero() {
            return Err(invalid("timeouts must be non-zero"));
        }
        if self.max_concurrency == 0 {
            return Err(invalid("max_concurrency must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ResearchError {
    ResearchError::InvalidConfig {
        reason: reason.to_string(),
    }
}
