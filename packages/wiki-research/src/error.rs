//! Typed errors for the research library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! fatal main-topic failure apart from a related link that simply dropped out.

use thiserror::Error;

/// Errors that can occur while resolving, fetching or exporting articles.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// Neither the direct lookup nor the search fallback found anything
    #[error("no page found for '{topic}'")]
    NotFound { topic: String },

    /// A match was found but its document could not be retrieved
    #[error("tried '{title}' but got status {reason}")]
    FetchFailed { title: String, reason: String },

    /// The main content container is missing entirely
    #[error("malformed document for '{title}': no content container")]
    MalformedDocument { title: String },

    /// The search API request itself failed
    #[error("search for '{term}' failed: {reason}")]
    Search { term: String, reason: String },

    /// Operation was cancelled
    #[error("operation cancelled")]
    Cancelled,

    /// Request exceeded its time budget
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration rejected by validation
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// Writing an export failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResearchError {
    /// Map a reqwest failure, keeping timeouts distinct from other transport errors.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResearchError::Timeout {
                url: url.to_string(),
            }
        } else {
            ResearchError::Http(Box::new(err))
        }
    }

    /// Whether this error came from the network layer rather than lookup logic.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ResearchError::Http(_) | ResearchError::Timeout { .. } | ResearchError::Search { .. }
        )
    }
}

/// Result type alias for research operations.
pub type Result<T> = std::result::Result<T, ResearchError>;
