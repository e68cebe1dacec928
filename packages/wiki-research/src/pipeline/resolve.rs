//! Topic resolution: exact lookup first, one level of search correction second.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{ResearchError, Result};
use crate::traits::fetcher::{DocumentFetcher, FetchedPage};
use crate::traits::searcher::Searcher;
use crate::types::article::{title_to_path, ArticleDocument, ResolvedArticle, Topic};
use crate::types::config::WikiConfig;

/// Resolves topics to fetched articles.
///
/// No caching: resolving the same topic twice fetches twice.
pub struct ArticleFetcher<F, S> {
    fetcher: Arc<F>,
    searcher: Arc<S>,
    config: WikiConfig,
}

impl<F, S> Clone for ArticleFetcher<F, S> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            searcher: Arc::clone(&self.searcher),
            config: self.config.clone(),
        }
    }
}

impl<F: DocumentFetcher, S: Searcher> ArticleFetcher<F, S> {
    /// Create a resolver over a fetcher and a searcher.
    pub fn new(fetcher: F, searcher: S, config: WikiConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            searcher: Arc::new(searcher),
            config,
        }
    }

    pub fn config(&self) -> &WikiConfig {
        &self.config
    }

    /// Resolve a topic to an article.
    ///
    /// 1. Fetch `{base}{path}{topic with underscores}`; success returns immediately.
    /// 2. Otherwise search for the topic with spaces; no hit is `NotFound`.
    /// 3. Fetch the top hit; failure is `FetchFailed`. No further fallback.
    pub async fn resolve(&self, topic: &Topic) -> Result<ResolvedArticle> {
        let sanitized = topic.canonical();
        let url = self.config.article_url(&sanitized);

        match self.fetcher.fetch(&url).await {
            Ok(page) if page.is_success() => {
                debug!(topic = %topic, "Direct lookup hit");
                return Ok(ResolvedArticle::new(sanitized, ArticleDocument::new(page.body)));
            }
            Ok(page) => {
                debug!(topic = %topic, status = page.status, "Direct lookup missed, searching");
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "Direct lookup failed, searching");
            }
        }

        let term = topic.display();
        let matched = self
            .searcher
            .best_match(&term)
            .await?
            .ok_or_else(|| ResearchError::NotFound {
                topic: topic.as_str().to_string(),
            })?;

        let corrected = title_to_path(&matched);
        let url = self.config.article_url(&corrected);
        info!(topic = %topic, matched = %matched, "Using search match");

        let page = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| ResearchError::FetchFailed {
                title: matched.clone(),
                reason: e.to_string(),
            })?;

        if !page.is_success() {
            return Err(ResearchError::FetchFailed {
                title: matched,
                reason: status_reason(&page),
            });
        }

        Ok(ResolvedArticle::new(corrected, ArticleDocument::new(page.body)))
    }
}

fn status_reason(page: &FetchedPage) -> String {
    if (200..300).contains(&page.status) {
        format!("{} (empty body)", page.status)
    } else {
        page.status.to_string()
    }
}
