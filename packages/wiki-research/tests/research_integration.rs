//! Integration tests for full research runs against a mock wiki.
//!
//! These exercise the public API end to end:
//! 1. Resolve the main topic (direct or via search)
//! 2. Extract links and optional enrichment
//! 3. Fan out to related articles
//! 4. Filter and export

use wiki_research::{
    export,
    testing::{lead_paragraph, ArticleFixture, MockWiki},
    MatchMode, MockFetcher, MockSearcher, ResearchMode, ResearchPipeline, ResearchRequest,
};

/// Helper to build a pipeline from a mock wiki.
fn pipeline(wiki: MockWiki) -> ResearchPipeline<MockFetcher, MockSearcher> {
    ResearchPipeline::new(wiki.fetcher, wiki.searcher, wiki.config)
}

/// Dog article linking to five canids; every related page exists.
fn canid_wiki() -> MockWiki {
    MockWiki::new()
        .with_article(
            "Dog",
            ArticleFixture::new("Dog")
                .paragraph("The dog is a canine.")
                .paragraph(lead_paragraph("dog"))
                .links(&["Gray_wolf", "File:Dog.jpg", "Dingo", "Dingo", "Fox", "Jackal"])
                .category("Dogs")
                .category("Cosmopolitan species"),
        )
        .with_article(
            "Gray_wolf",
            ArticleFixture::new("Gray wolf")
                .paragraph(lead_paragraph("gray wolf"))
                .category("Wolves")
                .category("Animal science"),
        )
        .with_article(
            "Dingo",
            ArticleFixture::new("Dingo")
                .paragraph(lead_paragraph("dingo"))
                .category("Dogs of Australia"),
        )
        .with_article(
            "Fox",
            ArticleFixture::new("Fox")
                .paragraph("Foxes are studied in Science and folklore alike across many different cultures of the wide world today.")
                .category("Canids"),
        )
        .with_article("Jackal", ArticleFixture::new("Jackal"))
        .with_search("doog", &["Dog"])
}

#[tokio::test]
async fn test_dog_links_mode_limit_three() {
    let result = pipeline(canid_wiki())
        .run(&ResearchRequest::new("Dog").with_limit(3))
        .await
        .unwrap();

    assert_eq!(result.main.title, "Dog");
    assert_eq!(result.main.excerpt, "");
    assert!(result.related.len() <= 3);
    for item in &result.related {
        assert_eq!(item.excerpt, "");
        assert!(item.categories.is_empty());
    }
}

#[tokio::test]
async fn test_related_length_equals_limit_in_document_order_with_duplicates() {
    let result = pipeline(canid_wiki())
        .run(&ResearchRequest::new("Dog").with_limit(4))
        .await
        .unwrap();

    let urls: Vec<_> = result.related.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://en.wikipedia.org/wiki/Gray_wolf",
            "https://en.wikipedia.org/wiki/Dingo",
            "https://en.wikipedia.org/wiki/Dingo",
            "https://en.wikipedia.org/wiki/Fox",
        ]
    );
    assert_eq!(result.related[0].title, "Gray wolf");
}

#[tokio::test]
async fn test_misspelled_topic_reports_corrected_title() {
    let result = pipeline(canid_wiki())
        .run(&ResearchRequest::new("doog").with_limit(1))
        .await
        .unwrap();

    assert_eq!(result.original_input, "doog");
    assert_eq!(result.main.title, "Dog");
    assert_eq!(result.main.url, "https://en.wikipedia.org/wiki/Dog");
}

#[tokio::test]
async fn test_filtered_science_keeps_main_and_matching_related() {
    let result = pipeline(canid_wiki())
        .run(
            &ResearchRequest::new("Dog")
                .with_mode(ResearchMode::Filtered)
                .with_limit(10)
                .with_keywords(["science"]),
        )
        .await
        .unwrap();

    // main article does not mention science but is always kept
    assert_eq!(result.main.title, "Dog");
    assert!(!result.main.search_blob().contains("science"));

    let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Gray wolf", "Fox"]);
}

#[tokio::test]
async fn test_and_is_stricter_than_or() {
    let run = |match_mode| {
        let request = ResearchRequest::new("Dog")
            .with_mode(ResearchMode::Filtered)
            .with_limit(10)
            .with_keywords(["dogs", "australia"])
            .with_match_mode(match_mode);
        async move { pipeline(canid_wiki()).run(&request).await.unwrap() }
    };

    let or = run(MatchMode::Or).await;
    let and = run(MatchMode::And).await;

    assert!(and.related.len() <= or.related.len());
    for item in &and.related {
        assert!(or.related.contains(item));
    }
    let and_titles: Vec<_> = and.related.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(and_titles, vec!["Dingo", "Dingo"]);
}

#[tokio::test]
async fn test_excerpt_is_first_substantial_paragraph_cleaned() {
    let result = pipeline(canid_wiki())
        .run(&ResearchRequest::new("Dog").with_mode(ResearchMode::Summaries).with_limit(0))
        .await
        .unwrap();

    assert_eq!(result.main.excerpt, lead_paragraph("dog"));
    assert_eq!(result.main.categories, vec!["Dogs", "Cosmopolitan species"]);
}

#[tokio::test]
async fn test_zero_qualifying_links() {
    let wiki = MockWiki::new().with_article(
        "Stub",
        ArticleFixture::new("Stub").links(&["Help:Contents", "Special:Random"]),
    );

    let result = pipeline(wiki)
        .run(&ResearchRequest::new("Stub").with_limit(5))
        .await
        .unwrap();
    assert!(result.related.is_empty());
}

#[tokio::test]
async fn test_related_failures_do_not_change_outcome() {
    let wiki = canid_wiki().with_status("Dingo", 500);

    let result = pipeline(wiki)
        .run(&ResearchRequest::new("Dog").with_limit(4))
        .await
        .unwrap();

    let titles: Vec<_> = result.related.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Gray wolf", "Fox"]);
}

#[tokio::test]
async fn test_export_records_main_then_related() {
    let result = pipeline(canid_wiki())
        .run(&ResearchRequest::new("Dog").with_limit(2))
        .await
        .unwrap();

    let text = export::to_text(&result.records());
    assert!(text.starts_with("Title: Dog\nUrl: https://en.wikipedia.org/wiki/Dog\n"));
    assert_eq!(text.matches("Title: ").count(), 3);
}
