//! Application state for the search server

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::Result;
use crate::index::VectorIndex;
use crate::ingestion::IngestPipeline;
use crate::orchestrator::{ExpertSelector, KeywordSelector, QueryOrchestrator};
use crate::providers::{
    CompletionProvider, ContentStore, EmbeddingProvider, MemoryContentStore, OllamaCompletion,
    OllamaEmbedder,
};
use crate::registry::ExpertRegistry;
use crate::retrieval::ContextRetriever;
use crate::synthesis::AnswerSynthesizer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PortalConfig,
    registry: Arc<ExpertRegistry>,
    pipeline: IngestPipeline,
    orchestrator: QueryOrchestrator,
    embedder: Arc<dyn EmbeddingProvider>,
    completion: Arc<dyn CompletionProvider>,
}

impl AppState {
    /// Build state with the default providers (Ollama + in-memory stores)
    pub async fn new(config: PortalConfig) -> Result<Self> {
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(OllamaEmbedder::new(
            &config.llm,
            config.llm.embed_dimensions,
        ));
        let completion: Arc<dyn CompletionProvider> = Arc::new(OllamaCompletion::new(&config.llm));
        let content_store: Arc<dyn ContentStore> = Arc::new(MemoryContentStore::new());
        let selector: Arc<dyn ExpertSelector> = Arc::new(KeywordSelector::new(
            config.orchestrator.max_selected_experts,
        ));

        Self::with_providers(config, embedder, completion, content_store, selector)
    }

    /// Build state with explicit providers; the seam for tests and
    /// alternative backends.
    pub fn with_providers(
        config: PortalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        completion: Arc<dyn CompletionProvider>,
        content_store: Arc<dyn ContentStore>,
        selector: Arc<dyn ExpertSelector>,
    ) -> Result<Self> {
        config.validate()?;

        tracing::info!(
            embedder = embedder.name(),
            completion = completion.name(),
            selector = selector.name(),
            "initializing pipeline state"
        );

        let registry = Arc::new(ExpertRegistry::new());
        let index = Arc::new(VectorIndex::new());

        let pipeline = IngestPipeline::new(
            &config,
            Arc::clone(&embedder),
            Arc::clone(&content_store),
            Arc::clone(&index),
            Arc::clone(&registry),
        );

        let retriever = Arc::new(ContextRetriever::new(
            &config,
            Arc::clone(&embedder),
            Arc::clone(&content_store),
            Arc::clone(&index),
            Arc::clone(&registry),
        ));

        let synthesizer = AnswerSynthesizer::new(Arc::clone(&completion));

        let orchestrator = QueryOrchestrator::new(
            &config,
            selector,
            retriever,
            synthesizer,
            Arc::clone(&registry),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                registry,
                pipeline,
                orchestrator,
                embedder,
                completion,
            }),
        })
    }

    /// Pipeline configuration
    pub fn config(&self) -> &PortalConfig {
        &self.inner.config
    }

    /// Expert registry
    pub fn registry(&self) -> &ExpertRegistry {
        &self.inner.registry
    }

    /// Ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Query orchestrator
    pub fn orchestrator(&self) -> &QueryOrchestrator {
        &self.inner.orchestrator
    }

    /// True when both external capabilities answer health checks
    pub async fn capabilities_healthy(&self) -> bool {
        let embedder_ok = self.inner.embedder.health_check().await.unwrap_or(false);
        let completion_ok = self.inner.completion.health_check().await.unwrap_or(false);
        embedder_ok && completion_ok
    }
}
