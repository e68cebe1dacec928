//! Research pipeline: resolve a topic, fan out to related articles, filter.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ResearchError, Result};
use crate::pipeline::extract::ArticleExtractor;
use crate::pipeline::filter;
use crate::pipeline::normalize;
use crate::pipeline::resolve::ArticleFetcher;
use crate::traits::{fetcher::DocumentFetcher, searcher::Searcher};
use crate::types::article::{ArticleSummary, ResolvedArticle, Topic};
use crate::types::config::WikiConfig;
use crate::types::research::{PipelineResult, ResearchMode, ResearchRequest};

/// Outcome of one related-article slot.
enum Slot {
    Done(Option<ArticleSummary>),
    Abandoned,
}

/// Orchestrates a research run over a fetcher and a searcher.
///
/// # Example
///
/// ```rust,ignore
/// use wiki_research::{MediaWikiClient, ResearchPipeline, ResearchRequest, ResearchMode, WikiConfig};
///
/// let config = WikiConfig::default();
/// let client = MediaWikiClient::new(config.clone())?;
/// let pipeline = ResearchPipeline::new(client.clone(), client, config);
///
/// let request = ResearchRequest::new("Dog")
///     .with_mode(ResearchMode::Filtered)
///     .with_limit(3)
///     .with_keywords(["science"]);
/// let result = pipeline.run(&request).await?;
/// ```
pub struct ResearchPipeline<F, S> {
    fetcher: ArticleFetcher<F, S>,
    extractor: ArticleExtractor,
}

impl<F: DocumentFetcher, S: Searcher> ResearchPipeline<F, S> {
    /// Create a pipeline.
    pub fn new(fetcher: F, searcher: S, config: WikiConfig) -> Self {
        let extractor = ArticleExtractor::from_config(&config);
        Self {
            fetcher: ArticleFetcher::new(fetcher, searcher, config),
            extractor,
        }
    }

    pub fn config(&self) -> &WikiConfig {
        self.fetcher.config()
    }

    /// Run to completion.
    pub async fn run(&self, request: &ResearchRequest) -> Result<PipelineResult> {
        self.run_with_cancel(request, CancellationToken::new()).await
    }

    /// Run with cancellation support.
    ///
    /// Cancelled before the main article resolves: `Cancelled`. Cancelled
    /// during fan-out: the related articles finished so far, in link order,
    /// with `cancelled` set.
    pub async fn run_with_cancel(
        &self,
        request: &ResearchRequest,
        cancel: CancellationToken,
    ) -> Result<PipelineResult> {
        let topic = Topic::new(request.topic.clone());
        info!(
            topic = %topic,
            mode = %request.mode,
            limit = request.limit,
            keywords = request.keywords.len(),
            "Research run starting"
        );

        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ResearchError::Cancelled),
            result = self.fetcher.resolve(&topic) => result?,
        };

        let main_url = self.config().article_url(&resolved.canonical_title);
        let (main, links) = self.extract(
            &resolved,
            resolved.display_title(),
            main_url,
            request.mode,
            true,
        )?;

        let links: Vec<String> = links.into_iter().take(request.limit).collect();
        debug!(topic = %topic, related = links.len(), "Fanning out to related articles");

        let (mut related, cancelled) = self.fetch_related(&links, request.mode, &cancel).await;
        let fetched = related.len();

        if request.applies_filter() {
            related = filter::filter(related, &request.keywords, request.match_mode);
        }

        info!(
            topic = %topic,
            resolved = %main.title,
            requested = links.len(),
            fetched = fetched,
            kept = related.len(),
            cancelled = cancelled,
            "Research run completed"
        );

        Ok(PipelineResult {
            original_input: request.topic.clone(),
            main,
            related,
            mode: request.mode,
            keywords: request.keywords.clone(),
            match_mode: request.match_mode,
            cancelled,
        })
    }

    /// Resolve and summarize every link concurrently, keeping link order.
    ///
    /// Failures, timeouts and cancelled slots drop out; the rest stay in place.
    async fn fetch_related(
        &self,
        links: &[String],
        mode: ResearchMode,
        cancel: &CancellationToken,
    ) -> (Vec<ArticleSummary>, bool) {
        if links.is_empty() {
            return (Vec::new(), false);
        }

        let pool = links.len().min(self.config().max_concurrency).max(1);
        let semaphore = Arc::new(Semaphore::new(pool));
        let budget = self.config().related_timeout;

        let tasks = links.iter().enumerate().map(|(index, link)| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let work = async {
                    let _permit = semaphore.acquire().await.ok()?;
                    match tokio::time::timeout(budget, self.summarize_related(link, mode)).await {
                        Ok(Ok(summary)) => Some(summary),
                        Ok(Err(e)) => {
                            warn!(index = index, url = %link, error = %e, "Dropping related article");
                            None
                        }
                        Err(_) => {
                            warn!(index = index, url = %link, "Related article timed out");
                            None
                        }
                    }
                };

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => Slot::Abandoned,
                    summary = work => Slot::Done(summary),
                }
            }
        });

        let slots = join_all(tasks).await;

        let mut cancelled = false;
        let mut related = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Slot::Done(Some(summary)) => related.push(summary),
                Slot::Done(None) => {}
                Slot::Abandoned => cancelled = true,
            }
        }

        (related, cancelled)
    }

    /// Resolve one related link through the same path as the main topic.
    async fn summarize_related(&self, link: &str, mode: ResearchMode) -> Result<ArticleSummary> {
        let topic = Topic::from_article_url(link, &self.config().article_path).ok_or_else(|| {
            ResearchError::NotFound {
                topic: link.to_string(),
            }
        })?;

        let resolved = self.fetcher.resolve(&topic).await?;
        let (summary, _) = self.extract(&resolved, topic.display(), link.to_string(), mode, false)?;
        Ok(summary)
    }

    /// Parse once and pull out what the mode asks for.
    ///
    /// Kept synchronous so the parsed tree never lives across an await.
    fn extract(
        &self,
        resolved: &ResolvedArticle,
        title: String,
        url: String,
        mode: ResearchMode,
        with_links: bool,
    ) -> Result<(ArticleSummary, Vec<String>)> {
        let doc = resolved.document.parse();

        if self.config().require_content {
            self.extractor
                .check_content(&doc, &resolved.canonical_title)?;
        }

        let mut summary = ArticleSummary::new(title, url);
        if mode.needs_enrichment() {
            let paragraph = self.extractor.extract_first_paragraph(&doc);
            summary = summary
                .with_excerpt(normalize::clean(&paragraph))
                .with_categories(self.extractor.extract_categories(&doc));
        }

        let links = if with_links {
            self.extractor.extract_internal_links(&doc)
        } else {
            Vec::new()
        };

        Ok((summary, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{MockFetcher, MockSearcher};
    use crate::testing::{lead_paragraph, ArticleFixture, MockWiki};
    use crate::types::research::MatchMode;
    use std::time::Duration;

    fn pipeline(wiki: MockWiki) -> ResearchPipeline<MockFetcher, MockSearcher> {
        ResearchPipeline::new(wiki.fetcher, wiki.searcher, wiki.config)
    }

    fn dog_wiki() -> MockWiki {
        MockWiki::new()
            .with_article(
                "Dog",
                ArticleFixture::new("Dog")
                    .paragraph(lead_paragraph("dog"))
                    .links(&["Wolf", "Fox", "Jackal", "Coyote"])
                    .category("Dogs"),
            )
            .with_article(
                "Wolf",
                ArticleFixture::new("Wolf")
                    .paragraph(lead_paragraph("wolf"))
                    .category("Animal science"),
            )
            .with_article(
                "Fox",
                ArticleFixture::new("Fox").paragraph(lead_paragraph("fox")).category("Canids"),
            )
            .with_article(
                "Jackal",
                ArticleFixture::new("Jackal").paragraph(lead_paragraph("jackal")),
            )
            .with_article("Coyote", ArticleFixture::new("Coyote"))
    }

    #[tokio::test]
    async fn test_links_mode_leaves_enrichment_empty() {
        let result = pipeline(dog_wiki())
            .run(&ResearchRequest::new("Dog").with_limit(3))
            .await
            .unwrap();

        assert_eq!(result.main.title, "Dog");
        assert_eq!(result.main.url, "https://en.wikipedia.org/wiki/Dog");
        assert_eq!(result.main.excerpt, "");
        assert!(result.main.categories.is_empty());

        let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Wolf", "Fox", "Jackal"]);
        for item in &result.related {
            assert_eq!(item.excerpt, "");
            assert!(item.categories.is_empty());
        }
    }

    #[tokio::test]
    async fn test_summaries_mode_enriches_everything() {
        let result = pipeline(dog_wiki())
            .run(
                &ResearchRequest::new("Dog")
                    .with_mode(ResearchMode::Summaries)
                    .with_limit(2),
            )
            .await
            .unwrap();

        assert_eq!(result.main.excerpt, lead_paragraph("dog"));
        assert_eq!(result.main.categories, vec!["Dogs"]);
        assert_eq!(result.related[0].excerpt, lead_paragraph("wolf"));
        assert_eq!(result.related[1].categories, vec!["Canids"]);
    }

    #[tokio::test]
    async fn test_filtered_mode_filters_related_only() {
        let result = pipeline(dog_wiki())
            .run(
                &ResearchRequest::new("Dog")
                    .with_mode(ResearchMode::Filtered)
                    .with_limit(4)
                    .with_keywords(["science"]),
            )
            .await
            .unwrap();

        assert_eq!(result.main.title, "Dog");
        let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Wolf"]);
        assert_eq!(result.match_mode, MatchMode::Or);
    }

    #[tokio::test]
    async fn test_filtered_without_keywords_behaves_like_summaries() {
        let result = pipeline(dog_wiki())
            .run(
                &ResearchRequest::new("Dog")
                    .with_mode(ResearchMode::Filtered)
                    .with_limit(4),
            )
            .await
            .unwrap();
        assert_eq!(result.related.len(), 4);
        assert!(!result.related[0].excerpt.is_empty());
    }

    #[tokio::test]
    async fn test_failed_related_link_is_dropped() {
        let wiki = MockWiki::new()
            .with_article(
                "Dog",
                ArticleFixture::new("Dog").links(&["Wolf", "Missing_page", "Fox"]),
            )
            .with_article("Wolf", ArticleFixture::new("Wolf"))
            .with_article("Fox", ArticleFixture::new("Fox"));

        let result = pipeline(wiki)
            .run(&ResearchRequest::new("Dog").with_limit(5))
            .await
            .unwrap();

        let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Wolf", "Fox"]);
        assert!(!result.cancelled);
    }

    #[tokio::test]
    async fn test_related_link_with_escaped_reserved_character() {
        let wiki = MockWiki::new()
            .with_article(
                "Dog",
                ArticleFixture::new("Dog").links(&["C%23_(programming_language)"]),
            )
            .with_article(
                "C%23_(programming_language)",
                ArticleFixture::new("C#").paragraph(lead_paragraph("language")),
            );
        let fetcher = wiki.fetcher.clone();

        let result = pipeline(wiki)
            .run(
                &ResearchRequest::new("Dog")
                    .with_mode(ResearchMode::Summaries)
                    .with_limit(1),
            )
            .await
            .unwrap();

        assert_eq!(
            fetcher.calls(),
            vec![
                "https://en.wikipedia.org/wiki/Dog".to_string(),
                "https://en.wikipedia.org/wiki/C%23_(programming_language)".to_string(),
            ]
        );
        assert_eq!(result.related.len(), 1);
        assert_eq!(result.related[0].title, "C# (programming language)");
        assert_eq!(
            result.related[0].url,
            "https://en.wikipedia.org/wiki/C%23_(programming_language)"
        );
        assert_eq!(result.related[0].excerpt, lead_paragraph("language"));
    }

    #[tokio::test]
    async fn test_related_link_corrected_through_search_keeps_link_identity() {
        let wiki = MockWiki::new()
            .with_article("Dog", ArticleFixture::new("Dog").links(&["Grey_wolf"]))
            .with_article(
                "Gray_wolf",
                ArticleFixture::new("Gray wolf")
                    .paragraph(lead_paragraph("gray wolf"))
                    .category("Wolves"),
            )
            .with_search("Grey wolf", &["Gray wolf"]);
        let searcher = wiki.searcher.clone();

        let result = pipeline(wiki)
            .run(
                &ResearchRequest::new("Dog")
                    .with_mode(ResearchMode::Summaries)
                    .with_limit(1),
            )
            .await
            .unwrap();

        assert_eq!(searcher.calls(), vec!["Grey wolf".to_string()]);
        assert_eq!(result.related.len(), 1);
        let item = &result.related[0];
        assert_eq!(item.title, "Grey wolf");
        assert_eq!(item.url, "https://en.wikipedia.org/wiki/Grey_wolf");
        assert_eq!(item.excerpt, lead_paragraph("gray wolf"));
        assert_eq!(item.categories, vec!["Wolves"]);
    }

    #[tokio::test]
    async fn test_main_failure_is_fatal() {
        let err = pipeline(MockWiki::new())
            .run(&ResearchRequest::new("Nothing here"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_limit_zero_fetches_nothing_related() {
        let wiki = dog_wiki();
        let fetcher = wiki.fetcher.clone();

        let result = pipeline(wiki)
            .run(&ResearchRequest::new("Dog").with_limit(0))
            .await
            .unwrap();
        assert!(result.related.is_empty());
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fan_out_respects_concurrency_bound_and_order() {
        let mut wiki = dog_wiki().with_config(WikiConfig::default().with_max_concurrency(2));
        wiki.fetcher = wiki
            .fetcher
            .with_delay("https://en.wikipedia.org/wiki/Wolf", Duration::from_millis(50));
        let fetcher = wiki.fetcher.clone();

        let result = pipeline(wiki)
            .run(&ResearchRequest::new("Dog").with_limit(4))
            .await
            .unwrap();

        let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Wolf", "Fox", "Jackal", "Coyote"]);
        assert!(fetcher.peak_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_slow_related_article_times_out() {
        let mut wiki = dog_wiki().with_config(
            WikiConfig::default().with_related_timeout(Duration::from_millis(20)),
        );
        wiki.fetcher = wiki
            .fetcher
            .with_delay("https://en.wikipedia.org/wiki/Fox", Duration::from_secs(5));

        let result = pipeline(wiki)
            .run(&ResearchRequest::new("Dog").with_limit(3))
            .await
            .unwrap();

        let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Wolf", "Jackal"]);
    }

    #[tokio::test]
    async fn test_cancel_before_main_resolves() {
        let mut wiki = dog_wiki();
        wiki.fetcher = wiki
            .fetcher
            .with_delay("https://en.wikipedia.org/wiki/Dog", Duration::from_secs(5));
        let pipeline = pipeline(wiki);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = pipeline
            .run_with_cancel(&ResearchRequest::new("Dog"), cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::Cancelled));
    }

    #[tokio::test]
    async fn test_cancel_during_fan_out_keeps_partial_order() {
        let mut wiki = dog_wiki();
        wiki.fetcher = wiki
            .fetcher
            .with_delay("https://en.wikipedia.org/wiki/Fox", Duration::from_secs(5))
            .with_delay("https://en.wikipedia.org/wiki/Coyote", Duration::from_secs(5));
        let pipeline = pipeline(wiki);

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let result = pipeline
            .run_with_cancel(&ResearchRequest::new("Dog").with_limit(4), cancel)
            .await
            .unwrap();

        assert!(result.cancelled);
        let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Wolf", "Jackal"]);
    }

    #[tokio::test]
    async fn test_require_content_rejects_malformed_main() {
        let wiki = MockWiki::new()
            .with_config(WikiConfig::default().with_require_content(true))
            .with_article("Dog", ArticleFixture::new("Dog").without_content());

        let err = pipeline(wiki)
            .run(&ResearchRequest::new("Dog"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResearchError::MalformedDocument { .. }));
    }
}
