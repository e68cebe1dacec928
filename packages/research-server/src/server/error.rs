//! HTTP mapping for research errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wiki_research::ResearchError;

/// A main-topic failure rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub ResearchError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ResearchError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResearchError::FetchFailed { .. }
            | ResearchError::Search { .. }
            | ResearchError::Http(_)
            | ResearchError::Timeout { .. } => StatusCode::BAD_GATEWAY,
            ResearchError::MalformedDocument { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ResearchError> for ApiError {
    fn from(err: ResearchError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self.0, status = status.as_u16(), "Research request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Research request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
