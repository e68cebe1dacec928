//! Article-level types: topics, fetched documents and summaries.

use scraper::Html;
use serde::{Deserialize, Serialize};

/// A user-facing topic string.
///
/// Lookups use the canonical form (spaces as underscores); display and
/// search queries use the display form (underscores as spaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    /// Wrap a raw topic string as typed by a user.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Derive a topic from an internal article URL.
    ///
    /// Keeps everything after the last occurrence of `marker` exactly as it
    /// appears in the link, percent-escapes included. Returns `None` when the
    /// marker is absent.
    pub fn from_article_url(url: &str, marker: &str) -> Option<Self> {
        let (_, segment) = url.rsplit_once(marker)?;
        Some(Self(segment.to_string()))
    }

    /// The string exactly as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Underscore-joined identifier used to build a direct address.
    pub fn canonical(&self) -> String {
        self.0.replace(' ', "_")
    }

    /// Decoded, space-separated form for display and search queries.
    pub fn display(&self) -> String {
        path_to_title(&self.0)
    }
}

/// Article path segment for a plain title: underscores for spaces, reserved
/// characters percent-escaped.
pub fn title_to_path(title: &str) -> String {
    urlencoding::encode(&title.replace(' ', "_")).into_owned()
}

/// Plain title for an article path segment.
pub fn path_to_title(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
        .replace('_', " ")
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Topic {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Opaque handle over fetched article markup.
///
/// Parsing happens on demand so the handle can cross task boundaries;
/// the parsed tree is only ever held inside synchronous extraction.
#[derive(Debug, Clone)]
pub struct ArticleDocument {
    markup: String,
}

impl ArticleDocument {
    /// Wrap raw markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Parse the markup into a queryable tree.
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.markup)
    }

    /// Raw markup length in bytes.
    pub fn len(&self) -> usize {
        self.markup.len()
    }

    /// Check if any markup was fetched.
    pub fn is_empty(&self) -> bool {
        self.markup.trim().is_empty()
    }
}

/// A topic resolved to a concrete article.
#[derive(Debug, Clone)]
pub struct ResolvedArticle {
    /// Underscore-joined title actually fetched (may differ from the input
    /// after search fallback).
    pub canonical_title: String,

    /// The fetched document.
    pub document: ArticleDocument,
}

impl ResolvedArticle {
    /// Create a resolved article.
    pub fn new(canonical_title: impl Into<String>, document: ArticleDocument) -> Self {
        Self {
            canonical_title: canonical_title.into(),
            document,
        }
    }

    /// Decoded title with underscores shown as spaces.
    pub fn display_title(&self) -> String {
        path_to_title(&self.canonical_title)
    }
}

/// Structured summary of one article, handed to every consumer.
///
/// Empty `excerpt` and `categories` mean "not requested" in links mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ArticleSummary {
    /// Create a bare summary (links mode).
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            excerpt: String::new(),
            categories: Vec::new(),
        }
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self
    }

    /// Set the categories.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.categories = categories.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Lowercased title, excerpt and categories joined for keyword matching.
    pub fn search_blob(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.excerpt,
            self.categories.join(" ")
        )
        .to_lowercase()
    }
}
