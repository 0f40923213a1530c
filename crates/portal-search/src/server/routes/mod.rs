//! API routes

pub mod ingest;
pub mod query;

use axum::{
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build the /api router
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(ingest::ingest_document))
        .route("/query", post(query::search))
        .route("/experts", get(ingest::list_experts))
}
