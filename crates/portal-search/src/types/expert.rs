//! Expert registry record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification label produced by the expert classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpertType {
    /// Content is small enough to pass to synthesis verbatim
    Simple,
    /// Content is chunked, embedded, and indexed for similarity search
    RetrievalAugmented,
}

/// Type-specific expert state.
///
/// A sum type rather than a struct with optional fields: a simple expert
/// cannot carry a chunk count and a retrieval-augmented one cannot exist
/// without its index statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExpertKind {
    /// Verbatim content, served from the content store
    Simple,
    /// Chunked and indexed content
    RetrievalAugmented {
        /// Number of chunks currently indexed for this expert
        chunk_count: usize,
    },
}

impl ExpertKind {
    /// Classification label for this kind
    pub fn expert_type(&self) -> ExpertType {
        match self {
            Self::Simple => ExpertType::Simple,
            Self::RetrievalAugmented { .. } => ExpertType::RetrievalAugmented,
        }
    }
}

/// A per-source knowledge agent.
///
/// Exactly one expert exists per URL; re-ingestion upserts in place with
/// the type re-evaluated against the fresh content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expert {
    /// Source URL (primary key)
    pub url: String,
    /// Display title derived at ingest time
    pub title: String,
    /// Type-specific state
    pub kind: ExpertKind,
    /// When this expert was last (re-)ingested
    pub ingested_at: DateTime<Utc>,
}
