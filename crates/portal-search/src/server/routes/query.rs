//! Query endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{SearchAnswer, SearchRequest};

/// POST /api/query - Search across experts.
///
/// The sole externally observable contract of the pipeline: returns a
/// complete answer with sources, or a single error describing total
/// failure. Never a summary with zero sources.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchAnswer>> {
    let start = Instant::now();
    tracing::info!(query = %request.query, "search request");

    let answer = state.orchestrator().search(&request.query).await?;

    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        sources = answer.sources.len(),
        "search complete"
    );

    Ok(Json(answer))
}
