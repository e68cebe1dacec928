//! Research endpoints.
//!
//! The pipeline future is owned by the request; a client disconnect drops it
//! along with any related fetches still in flight.

use axum::{extract::State, Form, Json};
use serde::Deserialize;
use wiki_research::{
    DocumentFetcher, MatchMode, PipelineResult, ResearchMode, ResearchRequest, Searcher,
};

use crate::server::app::AppState;
use crate::server::error::ApiError;

/// URL-encoded form body for `POST /research`.
#[derive(Debug, Deserialize)]
pub struct ResearchForm {
    pub topic: String,
    #[serde(default)]
    pub mode: ResearchMode,
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Space-separated keywords.
    #[serde(default)]
    pub keywords: String,
    #[serde(default, rename = "match")]
    pub match_mode: MatchMode,
}

fn default_limit() -> usize {
    5
}

impl From<ResearchForm> for ResearchRequest {
    fn from(form: ResearchForm) -> Self {
        ResearchRequest::new(form.topic.trim())
            .with_mode(form.mode)
            .with_limit(form.limit)
            .with_keywords(form.keywords.split_whitespace())
            .with_match_mode(form.match_mode)
    }
}

pub async fn research_form_handler<F, S>(
    State(state): State<AppState<F, S>>,
    Form(form): Form<ResearchForm>,
) -> Result<Json<PipelineResult>, ApiError>
where
    F: DocumentFetcher + 'static,
    S: Searcher + 'static,
{
    run(&state, form.into()).await
}

pub async fn research_json_handler<F, S>(
    State(state): State<AppState<F, S>>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<PipelineResult>, ApiError>
where
    F: DocumentFetcher + 'static,
    S: Searcher + 'static,
{
    run(&state, request).await
}

async fn run<F, S>(
    state: &AppState<F, S>,
    request: ResearchRequest,
) -> Result<Json<PipelineResult>, ApiError>
where
    F: DocumentFetcher + 'static,
    S: Searcher + 'static,
{
    tracing::info!(topic = %request.topic, mode = %request.mode, "Research request");
    let result = state.pipeline.run(&request).await?;
    Ok(Json(result))
}
