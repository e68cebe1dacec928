//! Application setup and router construction.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use wiki_research::{DocumentFetcher, ResearchPipeline, Searcher};

use crate::server::routes::{health_handler, research_form_handler, research_json_handler};

/// Shared application state
pub struct AppState<F, S> {
    pub pipeline: Arc<ResearchPipeline<F, S>>,
}

impl<F, S> Clone for AppState<F, S> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Build the router around a research pipeline.
pub fn build_app<F, S>(pipeline: ResearchPipeline<F, S>) -> Router
where
    F: DocumentFetcher + 'static,
    S: Searcher + 'static,
{
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/research", post(research_form_handler::<F, S>))
        .route("/api/research", post(research_json_handler::<F, S>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
