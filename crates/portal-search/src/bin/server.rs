//! Search pipeline server binary
//!
//! Run with: cargo run -p portal-search --bin portal-search-server

use portal_search::{config::PortalConfig, server::SearchServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_search=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::var("PORTAL_CONFIG") {
        Ok(path) => PortalConfig::from_file(&path)?,
        Err(_) => {
            let config = PortalConfig::default();
            config.validate()?;
            config
        }
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - RAG threshold: {} bytes", config.classifier.rag_threshold);
    tracing::info!(
        "  - Chunking: size {} overlap {}",
        config.chunking.chunk_size,
        config.chunking.overlap
    );
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Generation model: {}", config.llm.generate_model);

    let server = SearchServer::new(config).await?;

    tracing::info!("API: http://{}", server.address());
    tracing::info!("  POST /api/ingest  - deliver crawled documents");
    tracing::info!("  POST /api/query   - search across experts");
    tracing::info!("  GET  /api/experts - list registered experts");

    server.start().await?;

    Ok(())
}
