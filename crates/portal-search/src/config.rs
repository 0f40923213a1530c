//! Configuration for the expert pipeline

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Expert classification configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding / LLM endpoint configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Query orchestration configuration
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl PortalConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration at startup.
    ///
    /// Chunking and threshold parameters are checked once here; the
    /// components themselves assume validated inputs and never fail
    /// per-call on configuration grounds.
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::config("chunking.chunk_size must be positive"));
        }
        if self.chunking.overlap >= self.chunking.chunk_size {
            return Err(Error::config(format!(
                "chunking.overlap ({}) must be smaller than chunking.chunk_size ({})",
                self.chunking.overlap, self.chunking.chunk_size
            )));
        }
        if self.classifier.rag_threshold == 0 {
            return Err(Error::config("classifier.rag_threshold must be positive"));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::config("retrieval.top_k must be positive"));
        }
        if self.orchestrator.max_concurrent_retrievals == 0 {
            return Err(Error::config(
                "orchestrator.max_concurrent_retrievals must be positive",
            ));
        }
        if self.orchestrator.max_selected_experts == 0 {
            return Err(Error::config(
                "orchestrator.max_selected_experts must be positive",
            ));
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Expert classification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Content length (bytes) above which an expert becomes
    /// retrieval-augmented instead of simple
    pub rag_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { rag_threshold: 4096 }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 100,
        }
    }
}

/// Ollama endpoint configuration for embeddings and generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Embedding dimensions (e.g., 768 for nomic-embed-text)
    pub embed_dimensions: usize,
    /// Generation model name
    pub generate_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            embed_dimensions: 768,
            generate_model: "llama3.2:3b".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of chunks to retrieve per retrieval-augmented expert
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Query orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Maximum retrievals in flight for one query
    pub max_concurrent_retrievals: usize,
    /// Overall query deadline in seconds
    pub query_deadline_secs: u64,
    /// Cap on how many experts selection may return for one query
    pub max_selected_experts: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_retrievals: 4,
            query_deadline_secs: 30,
            max_selected_experts: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PortalConfig::default().validate().is_ok());
    }

    #[test]
    fn overlap_must_be_smaller_than_chunk_size() {
        let mut config = PortalConfig::default();
        config.chunking.chunk_size = 100;
        config.chunking.overlap = 100;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let mut config = PortalConfig::default();
        config.chunking.chunk_size = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn zero_threshold_rejected() {
        let mut config = PortalConfig::default();
        config.classifier.rag_threshold = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
