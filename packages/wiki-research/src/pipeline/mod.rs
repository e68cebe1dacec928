//! The research pipeline, leaves first:
//!
//! - [`normalize`] - whitespace and punctuation cleanup
//! - [`resolve`] - exact lookup with one level of search correction
//! - [`extract`] - links, lead paragraph and categories from article markup
//! - [`filter`] - AND/OR keyword filtering
//! - [`research`] - orchestration with bounded, order-preserving fan-out

pub mod extract;
pub mod filter;
pub mod normalize;
pub mod research;
pub mod resolve;

pub use extract::ArticleExtractor;
pub use normalize::{clean, summarize_first_sentences};
pub use research::ResearchPipeline;
pub use resolve::ArticleFetcher;
