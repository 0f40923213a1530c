//! Ingestion pipeline: crawled document to queryable expert

pub mod chunker;
pub mod classifier;

pub use chunker::TextChunker;
pub use classifier::classify;

use chrono::Utc;
use std::sync::Arc;

use crate::config::PortalConfig;
use crate::error::Result;
use crate::index::VectorIndex;
use crate::providers::{ContentStore, EmbeddingProvider};
use crate::registry::ExpertRegistry;
use crate::types::{Document, Expert, ExpertKind, ExpertType};

/// Turns ingestion-feed documents into registered experts.
///
/// Simple experts store their content verbatim; retrieval-augmented ones
/// are chunked, embedded, and indexed. The feed is at-least-once, so the
/// whole operation is idempotent per URL.
pub struct IngestPipeline {
    chunker: TextChunker,
    rag_threshold: usize,
    embedder: Arc<dyn EmbeddingProvider>,
    content_store: Arc<dyn ContentStore>,
    index: Arc<VectorIndex>,
    registry: Arc<ExpertRegistry>,
}

impl IngestPipeline {
    /// Create a pipeline from validated configuration and shared state
    pub fn new(
        config: &PortalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        content_store: Arc<dyn ContentStore>,
        index: Arc<VectorIndex>,
        registry: Arc<ExpertRegistry>,
    ) -> Self {
        Self {
            chunker: TextChunker::new(&config.chunking),
            rag_threshold: config.classifier.rag_threshold,
            embedder,
            content_store,
            index,
            registry,
        }
    }

    /// Ingest one document, creating or replacing its expert.
    ///
    /// For the retrieval-augmented path, chunks are embedded and indexed
    /// before the registry record flips type, so a query arriving
    /// mid-ingest never observes a RAG expert with an empty index. A
    /// failure while chunking or embedding leaves the previous expert
    /// and its index untouched.
    pub async fn ingest(&self, document: Document) -> Result<Expert> {
        let _guard = self.registry.lock(&document.url).await;

        let expert_type = classify(&document.content, self.rag_threshold);
        tracing::info!(
            url = %document.url,
            content_len = document.content.len(),
            ?expert_type,
            "ingesting document"
        );

        let title = derive_title(&document.url, &document.content);

        let kind = match expert_type {
            ExpertType::Simple => {
                self.content_store.put(&document.url, &document.content).await?;
                ExpertKind::Simple
            }
            ExpertType::RetrievalAugmented => {
                let mut chunks = self.chunker.chunk(&document.url, &document.content);
                let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
                let embeddings = self.embedder.embed_batch(&texts).await?;
                for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
                    chunk.embedding = embedding;
                }

                let chunk_count = chunks.len();
                self.index.replace(&document.url, chunks);
                ExpertKind::RetrievalAugmented { chunk_count }
            }
        };

        let expert = Expert {
            url: document.url.clone(),
            title,
            kind,
            ingested_at: Utc::now(),
        };
        self.registry.upsert(expert.clone());

        // A RAG expert downgraded to simple keeps serving from the
        // content store; its stale chunks can go.
        if expert.kind == ExpertKind::Simple {
            self.index.remove(&document.url);
        }

        tracing::info!(url = %document.url, kind = ?expert.kind, "expert upserted");
        Ok(expert)
    }
}

/// Derive a display title from the first line of content, falling back
/// to the URL host.
fn derive_title(url: &str, content: &str) -> String {
    if let Some(line) = content.lines().map(str::trim).find(|l| !l.is_empty()) {
        let title: String = line.chars().take(80).collect();
        return title;
    }

    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_comes_from_first_nonempty_line() {
        let title = derive_title("https://a.example", "\n\n  Getting Started\nbody");
        assert_eq!(title, "Getting Started");
    }

    #[test]
    fn title_falls_back_to_host_for_empty_content() {
        assert_eq!(derive_title("https://docs.example/guide", ""), "docs.example");
    }

    #[test]
    fn long_first_lines_are_truncated() {
        let line = "t".repeat(200);
        assert_eq!(derive_title("https://a.example", &line).len(), 80);
    }
}
