//! Full-text search trait used for fuzzy topic correction.
//!
//! When a direct lookup misses, the fetcher turns the topic into a free-text
//! query and retries with the top hit. Only the first hit is ever consulted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ResearchError, Result};

/// One candidate article returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Article title, with spaces.
    pub title: String,

    /// Page id, if the search API reports one.
    pub page_id: Option<u64>,

    /// Snippet shown by the search API (may contain highlight markup).
    pub snippet: Option<String>,
}

impl SearchHit {
    /// Create a hit from a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page_id: None,
            snippet: None,
        }
    }

    /// Add a page id.
    pub fn with_page_id(mut self, page_id: u64) -> Self {
        self.page_id = Some(page_id);
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

/// Search trait for title lookup.
///
/// # Implementations
///
/// - `MediaWikiClient` - MediaWiki `list=search` API
/// - `MockSearcher` - For testing
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Search for articles matching a free-text term, best match first.
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>>;

    /// Title of the best match, if any.
    async fn best_match(&self, term: &str) -> Result<Option<String>> {
        Ok(self.search(term).await?.into_iter().next().map(|h| h.title))
    }
}

/// Mock searcher for testing.
///
/// Unknown terms return no hits; terms registered with `fail_on` return a
/// `Search` error.
#[derive(Default, Clone)]
pub struct MockSearcher {
    results: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,
    failing: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    /// Create a new mock searcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add hits for a term.
    pub fn with_hits(self, term: &str, hits: Vec<SearchHit>) -> Self {
        self.results
            .write()
            .unwrap()
            .insert(term.to_string(), hits);
        self
    }

    /// Add titles as hits for a term.
    pub fn with_titles(self, term: &str, titles: &[&str]) -> Self {
        let hits = titles.iter().map(|t| SearchHit::new(*t)).collect();
        self.with_hits(term, hits)
    }

    /// Make searches for a term fail.
    pub fn fail_on(self, term: &str) -> Self {
        self.failing.write().unwrap().push(term.to_string());
        self
    }

    /// Terms searched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of searches made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    async fn search(&self, term: &str) -> Result<Vec<SearchHit>> {
        self.calls.write().unwrap().push(term.to_string());

        if self.failing.read().unwrap().iter().any(|t| t == term) {
            return Err(ResearchError::Search {
                term: term.to_string(),
                reason: "mock failure".to_string(),
            });
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(term)
            .cloned()
            .unwrap_or_default())
    }
}
