//! Per-expert chunk storage with cosine similarity search

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::Chunk;

/// A chunk matched by a similarity query
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The matched chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query vector, higher is better
    pub similarity: f32,
}

/// In-memory vector index, one chunk set per expert URL.
///
/// The index is the sole owner of chunk storage; other components reach
/// chunks only through similarity queries keyed by expert. Shared across
/// concurrent queries and ingestions; per-key replacement is atomic so a
/// reader sees either the old chunk set or the new one, never a mix.
#[derive(Default)]
pub struct VectorIndex {
    experts: DashMap<String, Arc<Vec<Chunk>>>,
}

impl VectorIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the entire chunk set for an expert.
    ///
    /// Delete-then-insert semantics: no chunk from a previous version
    /// survives a re-index. Callers must only invoke this after chunk
    /// production (including embedding) has fully succeeded, so a failed
    /// re-ingest preserves the old chunk set.
    pub fn replace(&self, expert_url: &str, chunks: Vec<Chunk>) {
        tracing::debug!(
            expert_url,
            chunk_count = chunks.len(),
            "replacing indexed chunk set"
        );
        self.experts.insert(expert_url.to_string(), Arc::new(chunks));
    }

    /// Query the top-k chunks for an expert by cosine similarity.
    ///
    /// Results are ranked by descending similarity, ties broken by
    /// ascending chunk index. Requesting more chunks than exist returns
    /// all available. An expert with no indexed chunks is `NotFound`,
    /// distinct from an empty result at `k == 0`.
    pub fn query(&self, expert_url: &str, query_vector: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let chunks = self
            .experts
            .get(expert_url)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::not_found(expert_url))?;

        let mut scored: Vec<ScoredChunk> = chunks
            .iter()
            .map(|chunk| ScoredChunk {
                chunk: chunk.clone(),
                similarity: cosine_similarity(query_vector, &chunk.embedding),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then(a.chunk.chunk_index.cmp(&b.chunk.chunk_index))
        });
        scored.truncate(k);

        Ok(scored)
    }

    /// Number of chunks indexed for an expert, if any
    pub fn chunk_count(&self, expert_url: &str) -> Option<usize> {
        self.experts.get(expert_url).map(|entry| entry.value().len())
    }

    /// Remove an expert's chunks entirely (administrative operation)
    pub fn remove(&self, expert_url: &str) -> bool {
        self.experts.remove(expert_url).is_some()
    }
}

/// Cosine similarity between two vectors.
///
/// Mismatched dimensions or a zero vector score 0.0 rather than erroring;
/// such chunks simply rank last.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(url: &str, index: u32, embedding: Vec<f32>) -> Chunk {
        Chunk {
            expert_url: url.to_string(),
            chunk_index: index,
            content: format!("chunk {}", index),
            char_start: 0,
            char_end: 0,
            embedding,
        }
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.5, 0.5, 0.7];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn cosine_of_mismatched_dimensions_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
    }

    #[test]
    fn query_unknown_expert_is_not_found() {
        let index = VectorIndex::new();
        let result = index.query("https://missing.example", &[1.0], 5);
        assert!(matches!(result, Err(Error::ExpertNotFound(_))));
    }

    #[test]
    fn query_ranks_by_descending_similarity() {
        let index = VectorIndex::new();
        let url = "https://a.example";
        index.replace(
            url,
            vec![
                chunk(url, 0, vec![0.0, 1.0]),
                chunk(url, 1, vec![1.0, 0.0]),
                chunk(url, 2, vec![0.7, 0.7]),
            ],
        );

        let results = index.query(url, &[1.0, 0.0], 3).unwrap();
        let order: Vec<u32> = results.iter().map(|r| r.chunk.chunk_index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert!(results[0].similarity >= results[1].similarity);
        assert!(results[1].similarity >= results[2].similarity);
    }

    #[test]
    fn ties_break_by_ascending_chunk_index() {
        let index = VectorIndex::new();
        let url = "https://a.example";
        // identical embeddings, identical scores
        index.replace(
            url,
            vec![
                chunk(url, 2, vec![1.0, 0.0]),
                chunk(url, 0, vec![1.0, 0.0]),
                chunk(url, 1, vec![1.0, 0.0]),
            ],
        );

        let results = index.query(url, &[1.0, 0.0], 3).unwrap();
        let order: Vec<u32> = results.iter().map(|r| r.chunk.chunk_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn requesting_more_than_available_returns_all() {
        let index = VectorIndex::new();
        let url = "https://a.example";
        index.replace(url, vec![chunk(url, 0, vec![1.0]), chunk(url, 1, vec![0.5])]);

        let results = index.query(url, &[1.0], 50).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn k_zero_returns_empty_not_error() {
        let index = VectorIndex::new();
        let url = "https://a.example";
        index.replace(url, vec![chunk(url, 0, vec![1.0])]);
        assert!(index.query(url, &[1.0], 0).unwrap().is_empty());
    }

    #[test]
    fn replace_discards_every_previous_chunk() {
        let index = VectorIndex::new();
        let url = "https://a.example";
        index.replace(
            url,
            vec![chunk(url, 0, vec![1.0, 0.0]), chunk(url, 1, vec![0.0, 1.0])],
        );

        let mut replacement = chunk(url, 0, vec![1.0, 0.0]);
        replacement.content = "fresh".to_string();
        index.replace(url, vec![replacement]);

        let results = index.query(url, &[1.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "fresh");
    }

    #[test]
    fn remove_makes_expert_not_found() {
        let index = VectorIndex::new();
        let url = "https://a.example";
        index.replace(url, vec![chunk(url, 0, vec![1.0])]);
        assert!(index.remove(url));
        assert!(index.query(url, &[1.0], 1).is_err());
    }
}
