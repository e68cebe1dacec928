//! Collaborator implementations for fetching and searching.
//!
//! # Available Clients
//!
//! - `MediaWikiClient` - Live MediaWiki site over HTTP (fetch + search)
//! - `MockFetcher` / `MockSearcher` - For testing

mod mediawiki;
mod mock;

pub use mediawiki::{parse_search_response, MediaWikiClient};
pub use mock::MockFetcher;

// Re-export from traits for convenience
pub use crate::traits::fetcher::{DocumentFetcher, FetchedPage};
pub use crate::traits::searcher::{MockSearcher, SearchHit, Searcher};
