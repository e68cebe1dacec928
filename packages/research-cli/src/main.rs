//! Command-line research runs.
//!
//! Resolves a topic, follows its related links and prints the records, or
//! writes them to `{title}.txt` / `{title}.json`.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiki_research::{
    export, CancellationToken, MatchMode, MediaWikiClient, PipelineResult, ResearchMode,
    ResearchPipeline, ResearchRequest, WikiConfig,
};

#[derive(Parser, Debug)]
#[command(name = "wiki-research")]
#[command(about = "Summarize an encyclopedia topic and its related articles")]
struct Cli {
    /// Topic to research (spaces or underscores)
    topic: String,

    /// links, summaries or filtered
    #[arg(long, default_value = "links")]
    mode: ResearchMode,

    /// Maximum number of related articles
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Keywords for filtered mode
    #[arg(long, num_args = 1..)]
    keywords: Vec<String>,

    /// How keywords combine: and, or
    #[arg(long = "match", default_value = "or")]
    match_mode: MatchMode,

    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    output: OutputFormat,

    /// Directory for text/json exports
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long, env = "WIKI_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "WIKI_API_URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "WIKI_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Maximum related articles fetched at once
    #[arg(long, env = "WIKI_MAX_CONCURRENCY")]
    concurrency: Option<usize>,

    #[arg(long, env = "WIKI_USER_AGENT")]
    user_agent: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Console,
    Text,
    Json,
}

impl Cli {
    fn config(&self) -> WikiConfig {
        let mut config = WikiConfig::default();
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(api_url) = &self.api_url {
            config = config.with_api_url(api_url);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        if let Some(max) = self.concurrency {
            config = config.with_max_concurrency(max);
        }
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent);
        }
        config
    }

    fn request(&self) -> ResearchRequest {
        ResearchRequest::new(&self.topic)
            .with_mode(self.mode)
            .with_limit(self.limit)
            .with_keywords(self.keywords.iter().cloned())
            .with_match_mode(self.match_mode)
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,wiki_research=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config();
    let client = MediaWikiClient::new(config.clone()).context("Invalid wiki configuration")?;
    let pipeline = ResearchPipeline::new(client.clone(), client, config);

    // Ctrl-C keeps whatever related articles have already finished
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, finishing with partial results");
            on_signal.cancel();
        }
    });

    let result = pipeline.run_with_cancel(&cli.request(), cancel).await?;

    match cli.output {
        OutputFormat::Console => print_console(&result),
        OutputFormat::Text => {
            let path = export::write_text_file(&result, &cli.out_dir)
                .context("Failed to write text export")?;
            println!("{} {}", "Saved".green(), path.display());
        }
        OutputFormat::Json => {
            let path = export::write_json_file(&result, &cli.out_dir)
                .context("Failed to write JSON export")?;
            println!("{} {}", "Saved".green(), path.display());
        }
    }

    Ok(())
}

fn print_console(result: &PipelineResult) {
    if result.main.title != result.original_input {
        println!(
            "{} '{}' -> '{}'",
            "Resolved".bright_blue(),
            result.original_input,
            result.main.title
        );
    }
    if result.cancelled {
        println!("{}", "Run cancelled, related list is partial".yellow());
    }

    for (i, record) in result.records().into_iter().enumerate() {
        if i == 1 {
            println!("{}", "Related".bright_cyan().bold());
            println!();
        }
        println!("{} {}", "Title:".bold(), record.title);
        println!("{} {}", "URL:".bold(), record.url);
        if result.mode.needs_enrichment() {
            println!("{} {}", "Excerpt:".bold(), record.excerpt);
        }
        println!("{} {}", "Categories:".bold(), record.categories.join(", "));
        println!();
    }
}
