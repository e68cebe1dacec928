//! Request and result types for a research run.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::article::ArticleSummary;

/// What a run collects for each article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchMode {
    /// Titles and URLs only.
    #[default]
    Links,
    /// Titles, URLs, excerpts and categories.
    Summaries,
    /// Like `Summaries`, then keyword-filters the related list.
    Filtered,
}

impl ResearchMode {
    /// Whether excerpts and categories are extracted in this mode.
    pub fn needs_enrichment(&self) -> bool {
        matches!(self, ResearchMode::Summaries | ResearchMode::Filtered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchMode::Links => "links",
            ResearchMode::Summaries => "summaries",
            ResearchMode::Filtered => "filtered",
        }
    }
}

impl FromStr for ResearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "links" => Ok(ResearchMode::Links),
            "summaries" => Ok(ResearchMode::Summaries),
            "filtered" => Ok(ResearchMode::Filtered),
            other => Err(format!(
                "unknown mode '{}' (expected links, summaries or filtered)",
                other
            )),
        }
    }
}

impl std::fmt::Display for ResearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How multiple keywords combine when filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every keyword must appear.
    And,
    /// At least one keyword must appear.
    #[default]
    Or,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "and" => Ok(MatchMode::And),
            "or" => Ok(MatchMode::Or),
            other => Err(format!("unknown match mode '{}' (expected and or or)", other)),
        }
    }
}

/// Parameters for one research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// Topic as typed by the user (spaces or underscores).
    pub topic: String,

    #[serde(default)]
    pub mode: ResearchMode,

    /// Maximum number of related articles to fetch.
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default, rename = "match")]
    pub match_mode: MatchMode,
}

fn default_limit() -> usize {
    5
}

impl ResearchRequest {
    /// Create a links-mode request with the default limit.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            mode: ResearchMode::default(),
            limit: default_limit(),
            keywords: Vec::new(),
            match_mode: MatchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ResearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords = keywords.into_iter().map(|k| k.into()).collect();
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Whether the related list will be keyword-filtered.
    ///
    /// `Filtered` without keywords behaves like `Summaries`.
    pub fn applies_filter(&self) -> bool {
        self.mode == ResearchMode::Filtered && !self.keywords.is_empty()
    }
}

/// Outcome of one research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Topic exactly as the caller supplied it.
    pub original_input: String,

    /// The resolved main article, never filtered out.
    pub main: ArticleSummary,

    /// Related articles in link order.
    pub related: Vec<ArticleSummary>,

    pub mode: ResearchMode,
    pub keywords: Vec<String>,

    #[serde(rename = "match")]
    pub match_mode: MatchMode,

    /// True when cancellation cut the fan-out short.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
}

impl PipelineResult {
    /// Main article followed by related ones, the record order used by exporters.
    pub fn records(&self) -> Vec<&ArticleSummary> {
        std::iter::once(&self.main).chain(self.related.iter()).collect()
    }

    /// Underscore-joined main title, used for export file names.
    pub fn canonical_title(&self) -> String {
        self.main.title.replace(' ', "_")
    }
}
