//! In-memory vector index keyed by expert

pub mod vector;

pub use vector::{cosine_similarity, ScoredChunk, VectorIndex};
