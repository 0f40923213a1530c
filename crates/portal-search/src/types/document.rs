//! Ingested document and chunk types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crawled document delivered by the ingestion feed.
///
/// Documents are immutable once ingested; re-delivery of the same URL
/// supersedes the previous version rather than mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Source URL, the unique key for the resulting expert
    pub url: String,
    /// Raw extracted text
    pub content: String,
    /// When the crawler fetched this page
    #[serde(default = "Utc::now")]
    pub crawled_at: DateTime<Utc>,
}

impl Document {
    /// Create a document stamped with the current time
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
            crawled_at: Utc::now(),
        }
    }
}

/// A bounded span of a document's text, embedded for similarity search.
///
/// Chunks exist only for retrieval-augmented experts and are replaced as
/// a full set on re-indexing, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// URL of the owning expert
    pub expert_url: String,
    /// Position of this chunk within the document (0-based)
    pub chunk_index: u32,
    /// Chunk text
    pub content: String,
    /// Character offset of the chunk start in the source text
    pub char_start: usize,
    /// Character offset one past the chunk end
    pub char_end: usize,
    /// Embedding vector (empty until embedded)
    #[serde(default)]
    pub embedding: Vec<f32>,
}
