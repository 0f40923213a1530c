//! External capability traits and their implementations

pub mod content_store;
pub mod embedding;
pub mod llm;
pub mod ollama;

pub use content_store::{ContentStore, MemoryContentStore};
pub use embedding::EmbeddingProvider;
pub use llm::CompletionProvider;
pub use ollama::{OllamaCompletion, OllamaEmbedder};
