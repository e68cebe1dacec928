//! Encyclopedia Research Library
//!
//! Resolves a topic to a canonical article, follows a bounded number of its
//! internal links, and returns structured summaries (title, URL, excerpt,
//! categories), optionally keyword-filtered.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wiki_research::{MediaWikiClient, ResearchMode, ResearchPipeline, ResearchRequest, WikiConfig};
//!
//! let config = WikiConfig::default();
//! let client = MediaWikiClient::new(config.clone())?;
//! let pipeline = ResearchPipeline::new(client.clone(), client, config);
//!
//! // Misspellings are corrected through search
//! let result = pipeline
//!     .run(&ResearchRequest::new("doog").with_mode(ResearchMode::Summaries))
//!     .await?;
//! assert_eq!(result.main.title, "Dog");
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Fetch and search abstractions
//! - [`clients`] - MediaWiki HTTP client and mocks
//! - [`types`] - Topics, summaries, requests, results and config
//! - [`pipeline`] - Normalization, resolution, extraction, filtering, orchestration
//! - [`export`] - Text and JSON exporters
//! - [`testing`] - Markup fixtures and a wired-up mock wiki

pub mod clients;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use clients::{MediaWikiClient, MockFetcher};
pub use error::{ResearchError, Result};
pub use pipeline::{
    clean, filter::filter, summarize_first_sentences, ArticleExtractor, ArticleFetcher,
    ResearchPipeline,
};
pub use traits::{
    fetcher::{DocumentFetcher, FetchedPage},
    searcher::{MockSearcher, SearchHit, Searcher},
};
pub use types::{
    article::{ArticleDocument, ArticleSummary, ResolvedArticle, Topic},
    config::WikiConfig,
    research::{MatchMode, PipelineResult, ResearchMode, ResearchRequest},
};

// Re-export so callers can cancel without depending on tokio-util directly
pub use tokio_util::sync::CancellationToken;
