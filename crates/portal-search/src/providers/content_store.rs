//! Content store trait for verbatim simple-expert content

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{Error, Result};

/// Trait for storing full verbatim content keyed by source URL.
///
/// Simple experts serve their content straight from this store at query
/// time; the on-disk format is a collaborator concern, the pipeline only
/// needs point lookups.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Store content for a URL, replacing any previous version
    async fn put(&self, url: &str, content: &str) -> Result<()>;

    /// Retrieve content for a URL
    async fn get(&self, url: &str) -> Result<String>;

    /// Check whether content exists for a URL
    async fn exists(&self, url: &str) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// In-memory content store backed by a concurrent map
#[derive(Default)]
pub struct MemoryContentStore {
    contents: DashMap<String, String>,
}

impl MemoryContentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn put(&self, url: &str, content: &str) -> Result<()> {
        self.contents.insert(url.to_string(), content.to_string());
        Ok(())
    }

    async fn get(&self, url: &str) -> Result<String> {
        self.contents
            .get(url)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::not_found(url))
    }

    async fn exists(&self, url: &str) -> Result<bool> {
        Ok(self.contents.contains_key(url))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
