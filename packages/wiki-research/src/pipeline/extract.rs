//! Structure heuristics over Wikipedia-style article markup.
//!
//! Every extraction tolerates missing structure and returns an empty value
//! instead of failing. Only `check_content` reports a malformed document,
//! and callers decide whether to ask.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ResearchError, Result};
use crate::types::config::WikiConfig;

/// Main content container.
const CONTENT_SELECTOR: &str = "div.mw-parser-output";

/// Paragraphs directly under the content container.
const PARAGRAPH_SELECTOR: &str = "div.mw-parser-output > p";

/// Category list anchor point.
const CATEGORY_LIST_SELECTOR: &str = "#mw-normal-catlinks ul";

/// A paragraph must have more words than this to count as substantial.
const MIN_PARAGRAPH_WORDS: usize = 15;

/// Extracts links, the lead paragraph and categories from a parsed article.
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    site_root: String,
    namespace_prefix: String,
}

impl ArticleExtractor {
    /// Create an extractor for a site root and article namespace prefix.
    pub fn new(site_root: impl Into<String>, namespace_prefix: impl Into<String>) -> Self {
        Self {
            site_root: site_root.into(),
            namespace_prefix: namespace_prefix.into(),
        }
    }

    /// Create an extractor matching a config's site and namespace.
    pub fn from_config(config: &WikiConfig) -> Self {
        Self::new(&config.base_url, &config.article_path)
    }

    /// Absolute URLs of article links in the content container, in document order.
    ///
    /// Links whose href contains a namespace colon (`File:`, `Help:`, ...)
    /// are skipped. Duplicates are kept.
    pub fn extract_internal_links(&self, doc: &Html) -> Vec<String> {
        let selector = match Selector::parse(&format!("{} a[href]", CONTENT_SELECTOR)) {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        let links: Vec<String> = doc
            .select(&selector)
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| href.starts_with(&self.namespace_prefix) && !href.contains(':'))
            .map(|href| format!("{}{}", self.site_root, href))
            .collect();

        debug!(count = links.len(), "Extracted internal links");
        links
    }

    /// Text of the first direct-child paragraph with more than 15 words, or "".
    pub fn extract_first_paragraph(&self, doc: &Html) -> String {
        let selector = match Selector::parse(PARAGRAPH_SELECTOR) {
            Ok(s) => s,
            Err(_) => return String::new(),
        };

        doc.select(&selector)
            .map(element_text)
            .find(|text| text.split_whitespace().count() > MIN_PARAGRAPH_WORDS)
            .unwrap_or_default()
    }

    /// Category names from the category list, in order; empty if the list is absent.
    pub fn extract_categories(&self, doc: &Html) -> Vec<String> {
        let (list_selector, item_selector) =
            match (Selector::parse(CATEGORY_LIST_SELECTOR), Selector::parse("li")) {
                (Ok(list), Ok(item)) => (list, item),
                _ => return vec![],
            };

        match doc.select(&list_selector).next() {
            Some(list) => list.select(&item_selector).map(element_text).collect(),
            None => vec![],
        }
    }

    /// `MalformedDocument` when the content container is entirely absent.
    pub fn check_content(&self, doc: &Html, title: &str) -> Result<()> {
        let selector = Selector::parse(CONTENT_SELECTOR).map_err(|_| {
            ResearchError::MalformedDocument {
                title: title.to_string(),
            }
        })?;

        if doc.select(&selector).next().is_none() {
            return Err(ResearchError::MalformedDocument {
                title: title.to_string(),
            });
        }
        Ok(())
    }
}

/// Plain text of an element: each text fragment trimmed, empty ones dropped,
/// the rest joined with single spaces.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
