// Main entry point for the research API server

use anyhow::{Context, Result};
use research_server::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wiki_research::{MediaWikiClient, ResearchPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wiki_research=debug,research_server=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting wiki research API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(base_url = %config.wiki.base_url, "Configuration loaded");

    let client =
        MediaWikiClient::new(config.wiki.clone()).context("Failed to build wiki client")?;
    let app = build_app(ResearchPipeline::new(client.clone(), client, config.wiki));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutdown signal received");
    }
}
