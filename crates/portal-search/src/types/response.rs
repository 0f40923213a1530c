//! Retrieval and answer types

use serde::{Deserialize, Serialize};

/// Relevance score assigned to a simple expert's verbatim content.
///
/// Cosine similarity tops out at 1.0, so full-content retrieval has no
/// ranking ambiguity against chunked results.
pub const MAX_RELEVANCE: f32 = 1.0;

/// One piece of retrieved context with its relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredContext {
    /// Retrieved text (a chunk, or the full content for simple experts)
    pub content: String,
    /// Relevance score, higher is better
    pub score: f32,
    /// Original chunk index; 0 for full-content retrieval
    pub chunk_index: u32,
}

/// Ranked context retrieved from a single expert for one query.
///
/// Ephemeral, produced per query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// URL of the expert that produced this context
    pub expert_url: String,
    /// Contexts ranked by descending score, ties broken by chunk index
    pub contexts: Vec<ScoredContext>,
}

impl RetrievalResult {
    /// The top-ranked context, if any survived retrieval
    pub fn top_context(&self) -> Option<&ScoredContext> {
        self.contexts.first()
    }
}

/// A cited source contributing to a search answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Source URL
    pub url: String,
    /// Expert title
    pub title: String,
    /// Representative snippet (the expert's top-ranked context)
    pub snippet: String,
}

/// The final answer for one search query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAnswer {
    /// Synthesized summary
    pub summary: String,
    /// Contributing sources in expert contribution order
    pub sources: Vec<Source>,
}
