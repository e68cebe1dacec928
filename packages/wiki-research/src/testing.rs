//! Testing utilities: Wikipedia-shaped markup fixtures and a wired-up mock wiki.
//!
//! These let applications exercise the pipeline without network calls.

use scraper::Html;

use crate::clients::{MockFetcher, MockSearcher};
use crate::types::config::WikiConfig;

enum Block {
    Paragraph(String),
    Link(String),
}

/// Builder for a minimal article page.
///
/// Produces a `div.mw-parser-output` content container holding paragraphs
/// and links in insertion order, plus a `#mw-normal-catlinks` category list
/// when categories were added.
///
/// ```rust
/// use wiki_research::testing::ArticleFixture;
///
/// let html = ArticleFixture::new("Dog")
///     .paragraph("The dog is a domesticated descendant of the gray wolf, kept as a companion for thousands of years.")
///     .link("Gray_wolf")
///     .category("Dogs")
///     .to_html();
/// assert!(html.contains("mw-parser-output"));
/// ```
pub struct ArticleFixture {
    title: String,
    blocks: Vec<Block>,
    categories: Vec<String>,
    with_content: bool,
}

impl ArticleFixture {
    /// Start an article page with a heading.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
            categories: Vec::new(),
            with_content: true,
        }
    }

    /// Append a paragraph directly under the content container.
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    /// Append an internal link to `/wiki/{target}`.
    pub fn link(mut self, target: impl Into<String>) -> Self {
        self.blocks.push(Block::Link(target.into()));
        self
    }

    /// Append several internal links.
    pub fn links(mut self, targets: &[&str]) -> Self {
        for target in targets {
            self = self.link(*target);
        }
        self
    }

    /// Append a category.
    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    /// Render without the content container (a malformed page).
    pub fn without_content(mut self) -> Self {
        self.with_content = false;
        self
    }

    /// Render the page markup.
    pub fn to_html(&self) -> String {
        let mut body = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(text) => body.push_str(&format!("<p>{}</p>\n", text)),
                Block::Link(target) => body.push_str(&format!(
                    "<ul><li><a href=\"/wiki/{}\" title=\"{}\">{}</a></li></ul>\n",
                    target,
                    target.replace('_', " "),
                    target.replace('_', " ")
                )),
            }
        }

        let content = if self.with_content {
            format!(
                "<div id=\"mw-content-text\"><div class=\"mw-parser-output\">\n{}</div></div>",
                body
            )
        } else {
            format!("<div id=\"search-results\">\n{}</div>", body)
        };

        let categories = if self.categories.is_empty() {
            String::new()
        } else {
            let items: String = self
                .categories
                .iter()
                .map(|c| {
                    format!(
                        "<li><a href=\"/wiki/Category:{}\">{}</a></li>",
                        c.replace(' ', "_"),
                        c
                    )
                })
                .collect();
            format!(
                "<div id=\"catlinks\"><div id=\"mw-normal-catlinks\"><a href=\"/wiki/Help:Category\">Categories</a>: <ul>{}</ul></div></div>",
                items
            )
        };

        format!(
            "<!DOCTYPE html><html><head><title>{} - Wikipedia</title></head><body>\
             <h1 id=\"firstHeading\">{}</h1>{}{}</body></html>",
            self.title, self.title, content, categories
        )
    }

    /// Render and parse.
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.to_html())
    }
}

/// Mock fetcher and searcher wired to one config, with helpers keyed by title.
pub struct MockWiki {
    pub config: WikiConfig,
    pub fetcher: MockFetcher,
    pub searcher: MockSearcher,
}

impl Default for MockWiki {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWiki {
    /// Empty wiki using the default config.
    pub fn new() -> Self {
        Self {
            config: WikiConfig::default(),
            fetcher: MockFetcher::new(),
            searcher: MockSearcher::new(),
        }
    }

    /// Serve an article at its canonical title.
    pub fn with_article(mut self, canonical_title: &str, article: ArticleFixture) -> Self {
        let url = self.config.article_url(canonical_title);
        self.fetcher = self.fetcher.with_page(url, article.to_html());
        self
    }

    /// Make search for `term` return `titles`.
    pub fn with_search(mut self, term: &str, titles: &[&str]) -> Self {
        self.searcher = self.searcher.with_titles(term, titles);
        self
    }

    /// Serve an error status for a canonical title.
    pub fn with_status(mut self, canonical_title: &str, status: u16) -> Self {
        let url = self.config.article_url(canonical_title);
        self.fetcher = self.fetcher.with_status(url, status, "error");
        self
    }

    /// Set the config (call before adding articles).
    pub fn with_config(mut self, config: WikiConfig) -> Self {
        self.config = config;
        self
    }
}

/// A paragraph long enough to count as an article's lead.
pub fn lead_paragraph(subject: &str) -> String {
    format!(
        "The {} is a subject with a long and well documented history that scholars have studied in depth for many years.",
        subject
    )
}
