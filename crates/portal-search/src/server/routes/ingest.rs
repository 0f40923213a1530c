//! Ingestion feed endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{Document, Expert};

/// POST /api/ingest - Deliver one crawled document.
///
/// Accepts the crawler feed shape `{url, content, crawled_at}`. Delivery
/// is at-least-once upstream; redelivery upserts idempotently.
pub async fn ingest_document(
    State(state): State<AppState>,
    Json(document): Json<Document>,
) -> Result<Json<Expert>> {
    let expert = state.pipeline().ingest(document).await?;
    Ok(Json(expert))
}

/// GET /api/experts - List registered experts
pub async fn list_experts(State(state): State<AppState>) -> Json<Vec<Expert>> {
    Json(state.registry().list())
}
