//! Mock fetcher for testing.
//!
//! Serves canned pages by URL. Unknown URLs answer 404, like a wiki does
//! for a missing article.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{ResearchError, Result};
use crate::traits::fetcher::{DocumentFetcher, FetchedPage};

/// Mock document fetcher.
///
/// # Example
///
/// ```rust
/// use wiki_research::clients::MockFetcher;
///
/// let fetcher = MockFetcher::new()
///     .with_page("https://en.wikipedia.org/wiki/Dog", "<html>...</html>")
///     .with_status("https://en.wikipedia.org/wiki/Cat", 500, "oops");
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    /// Canned responses indexed by URL
    pages: Arc<RwLock<HashMap<String, (u16, String)>>>,
    /// URLs that fail at the transport level
    failing: Arc<RwLock<HashSet<String>>>,
    /// Artificial latency per URL
    delays: Arc<RwLock<HashMap<String, Duration>>>,
    /// Track calls for verification
    calls: Arc<RwLock<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockFetcher {
    /// Create a new empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 at `url`.
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    /// Serve `body` with an explicit status at `url`.
    pub fn with_status(self, url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(url.into(), (status, body.into()));
        self
    }

    /// Make requests to `url` fail with a transport error.
    pub fn fail_on(self, url: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(url.into());
        self
    }

    /// Delay responses for `url`.
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.write().unwrap().insert(url.into(), delay);
        self
    }

    /// URLs requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Requests currently in flight.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Most requests ever in flight at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// Counts a request as in flight until dropped, including when the fetch
/// future is abandoned mid-delay.
struct InFlightGuard {
    counter: Arc<AtomicUsize>,
    now: usize,
}

impl InFlightGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Self {
            counter: Arc::clone(counter),
            now,
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        let guard = InFlightGuard::enter(&self.in_flight);
        self.peak_in_flight.fetch_max(guard.now, Ordering::SeqCst);

        let delay = self.delays.read().unwrap().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        drop(guard);

        if self.failing.read().unwrap().contains(url) {
            return Err(ResearchError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                format!("mock transport failure for {}", url),
            ))));
        }

        let page = match self.pages.read().unwrap().get(url) {
            Some((status, body)) => FetchedPage::new(url, *status, body.clone()),
            None => FetchedPage::new(url, 404, ""),
        };
        Ok(page)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
