//! Durable expert registry keyed by source URL

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::{Error, Result};
use crate::types::Expert;

/// Single source of truth for expert records.
///
/// Exactly one record exists per URL. Upsert is idempotent, so the
/// at-least-once ingestion feed can redeliver documents safely. Reads
/// never block on writes to unrelated keys.
#[derive(Default)]
pub struct ExpertRegistry {
    experts: DashMap<String, Expert>,
    /// Per-URL ingest locks: concurrent upserts of the same source are
    /// serialized while distinct sources proceed in parallel.
    ingest_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ExpertRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for an expert.
    ///
    /// Writing an identical record twice leaves state unchanged and is
    /// not an error. For retrieval-augmented experts, callers must index
    /// chunks before upserting so a reader never observes the RAG type
    /// ahead of a queryable index.
    pub fn upsert(&self, expert: Expert) {
        self.experts.insert(expert.url.clone(), expert);
    }

    /// Look up an expert by URL
    pub fn get(&self, url: &str) -> Result<Expert> {
        self.experts
            .get(url)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::not_found(url))
    }

    /// Check whether an expert exists
    pub fn contains(&self, url: &str) -> bool {
        self.experts.contains_key(url)
    }

    /// Snapshot of all registered experts
    pub fn list(&self) -> Vec<Expert> {
        let mut experts: Vec<Expert> = self
            .experts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        experts.sort_by(|a, b| a.url.cmp(&b.url));
        experts
    }

    /// Number of registered experts
    pub fn len(&self) -> usize {
        self.experts.len()
    }

    /// True when no experts are registered
    pub fn is_empty(&self) -> bool {
        self.experts.is_empty()
    }

    /// Acquire the ingest lock for a URL.
    ///
    /// Held for the duration of one ingest so chunk indexing and the
    /// registry flip happen without a concurrent upsert racing on the
    /// same key.
    pub async fn lock(&self, url: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .ingest_locks
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Remove an expert record (administrative operation)
    pub fn remove(&self, url: &str) -> bool {
        self.experts.remove(url).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpertKind;
    use chrono::Utc;

    fn expert(url: &str, kind: ExpertKind) -> Expert {
        Expert {
            url: url.to_string(),
            title: "Test".to_string(),
            kind,
            ingested_at: Utc::now(),
        }
    }

    #[test]
    fn upsert_is_idempotent() {
        let registry = ExpertRegistry::new();
        let record = expert("https://a.example", ExpertKind::Simple);

        registry.upsert(record.clone());
        registry.upsert(record.clone());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("https://a.example").unwrap(), record);
    }

    #[test]
    fn upsert_replaces_kind_on_reingestion() {
        let registry = ExpertRegistry::new();
        registry.upsert(expert("https://a.example", ExpertKind::Simple));
        registry.upsert(expert(
            "https://a.example",
            ExpertKind::RetrievalAugmented { chunk_count: 7 },
        ));

        let record = registry.get("https://a.example").unwrap();
        assert_eq!(record.kind, ExpertKind::RetrievalAugmented { chunk_count: 7 });
    }

    #[test]
    fn get_unknown_url_is_not_found() {
        let registry = ExpertRegistry::new();
        assert!(matches!(
            registry.get("https://missing.example"),
            Err(Error::ExpertNotFound(_))
        ));
    }

    #[test]
    fn list_is_sorted_by_url() {
        let registry = ExpertRegistry::new();
        registry.upsert(expert("https://b.example", ExpertKind::Simple));
        registry.upsert(expert("https://a.example", ExpertKind::Simple));

        let urls: Vec<String> = registry.list().into_iter().map(|e| e.url).collect();
        assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
    }

    #[tokio::test]
    async fn locks_for_distinct_urls_are_independent() {
        let registry = ExpertRegistry::new();
        let _a = registry.lock("https://a.example").await;
        // must not deadlock on a different key
        let _b = registry.lock("https://b.example").await;
    }
}
