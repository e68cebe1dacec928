//! Core trait abstractions for the research library.
//!
//! These traits define the network collaborators the pipeline depends on,
//! so tests and alternative backends can stand in for the live encyclopedia.

pub mod fetcher;
pub mod searcher;
