//! Text-completion provider trait for answer synthesis

use async_trait::async_trait;

use crate::error::Result;

/// Trait for the pluggable text-completion capability.
///
/// The pipeline treats answer generation as an external collaborator: it
/// hands over a fully built prompt and gets back text, or a failure that
/// surfaces as a synthesis failure.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a prompt into answer text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier in use
    fn model(&self) -> &str;
}
