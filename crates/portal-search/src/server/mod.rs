//! HTTP entry point for the pipeline

pub mod routes;
pub mod state;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::PortalConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Search pipeline HTTP server
pub struct SearchServer {
    state: AppState,
}

impl SearchServer {
    /// Create a server with the default providers
    pub async fn new(config: PortalConfig) -> Result<Self> {
        let state = AppState::new(config).await?;
        Ok(Self { state })
    }

    /// Create a server over prebuilt state
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness))
            .nest("/api", routes::api_routes())
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start serving until the process exits
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::config(format!("Invalid address: {}", e)))?;

        let router = self.router();

        tracing::info!("Starting search server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::config(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Server bind address
    pub fn address(&self) -> String {
        let server = &self.state.config().server;
        format!("{}:{}", server.host, server.port)
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Readiness: both external capabilities must answer
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.capabilities_healthy().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
