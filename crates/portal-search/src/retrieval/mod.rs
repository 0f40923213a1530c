//! Per-expert context retrieval

use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::providers::{ContentStore, EmbeddingProvider};
use crate::registry::ExpertRegistry;
use crate::types::{ExpertKind, RetrievalResult, ScoredContext};
use crate::types::response::MAX_RELEVANCE;

/// Retrieves ranked context from one expert for one query.
///
/// Simple experts return their full content as a single maximal-score
/// context; retrieval-augmented experts are queried through the vector
/// index. Failures are scoped to the expert: callers running a fan-out
/// treat them as partial, not total.
pub struct ContextRetriever {
    top_k: usize,
    embedder: Arc<dyn EmbeddingProvider>,
    content_store: Arc<dyn ContentStore>,
    index: Arc<VectorIndex>,
    registry: Arc<ExpertRegistry>,
}

impl ContextRetriever {
    /// Create a retriever over shared pipeline state
    pub fn new(
        config: &PortalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        content_store: Arc<dyn ContentStore>,
        index: Arc<VectorIndex>,
        registry: Arc<ExpertRegistry>,
    ) -> Self {
        Self {
            top_k: config.retrieval.top_k,
            embedder,
            content_store,
            index,
            registry,
        }
    }

    /// Retrieve ranked context for a query from the named expert.
    ///
    /// Fails with `ExpertNotFound` for unknown URLs; embedding failures
    /// propagate tagged as retrieval failures for this expert only.
    pub async fn retrieve(&self, query: &str, expert_url: &str) -> Result<RetrievalResult> {
        let expert = self.registry.get(expert_url)?;

        let contexts = match expert.kind {
            ExpertKind::Simple => {
                let content = self.content_store.get(expert_url).await?;
                vec![ScoredContext {
                    content,
                    score: MAX_RELEVANCE,
                    chunk_index: 0,
                }]
            }
            ExpertKind::RetrievalAugmented { .. } => {
                let query_vector = self
                    .embedder
                    .embed(query)
                    .await
                    .map_err(|e| Error::embedding(format!("query embedding failed: {}", e)))?;

                self.index
                    .query(expert_url, &query_vector, self.top_k)?
                    .into_iter()
                    .map(|scored| ScoredContext {
                        content: scored.chunk.content,
                        score: scored.similarity,
                        chunk_index: scored.chunk.chunk_index,
                    })
                    .collect()
            }
        };

        tracing::debug!(
            expert_url,
            contexts = contexts.len(),
            "retrieved context"
        );

        Ok(RetrievalResult {
            expert_url: expert_url.to_string(),
            contexts,
        })
    }
}
