//! Ollama-backed providers for embeddings and completion

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::CompletionProvider;

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama embedding provider using nomic-embed-text or similar models
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
    dimensions: usize,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    pub fn new(config: &LlmConfig, dimensions: usize) -> Self {
        Self {
            client: http_client(config),
            base_url: config.base_url.clone(),
            model: config.embed_model.clone(),
            dimensions,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: &self.model,
            prompt: text,
        };

        let response = self
            .client
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::embedding(format!("request to Ollama failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::embedding(format!(
                "Ollama returned status {}",
                response.status()
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::embedding(format!("invalid embedding response: {}", e)))?;

        Ok(embed_response.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        check_tags(&self.client, &self.base_url).await
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Ollama completion provider for answer generation
pub struct OllamaCompletion {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaCompletion {
    /// Create a new Ollama completion provider
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: http_client(config),
            base_url: config.base_url.clone(),
            model: config.generate_model.clone(),
        }
    }
}

#[async_trait]
impl CompletionProvider for OllamaCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::completion(format!("request to Ollama failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::completion(format!(
                "Ollama returned status {}",
                response.status()
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::completion(format!("invalid generate response: {}", e)))?;

        Ok(generate_response.response.trim().to_string())
    }

    async fn health_check(&self) -> Result<bool> {
        check_tags(&self.client, &self.base_url).await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn http_client(config: &LlmConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .unwrap_or_default()
}

async fn check_tags(client: &Client, base_url: &str) -> Result<bool> {
    match client.get(format!("{}/api/tags", base_url)).send().await {
        Ok(resp) => Ok(resp.status().is_success()),
        Err(_) => Ok(false),
    }
}
