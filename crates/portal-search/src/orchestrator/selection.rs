//! Pluggable expert selection strategies

use crate::registry::ExpertRegistry;

/// Strategy for resolving which experts to consult for a query.
///
/// Selection is isolated behind this trait so routing policy can change
/// (static list, keyword match, a future semantic router) without
/// touching fan-out or merge logic. The returned order is the source
/// order of the final answer.
pub trait ExpertSelector: Send + Sync {
    /// Resolve candidate expert URLs for a query, in consultation order
    fn select(&self, query: &str, registry: &ExpertRegistry) -> Vec<String>;

    /// Strategy name for logging
    fn name(&self) -> &str;
}

/// Selects a fixed list of experts regardless of the query.
///
/// The minimal policy: equivalent to consulting a configured set of
/// known sources for every search.
pub struct StaticSelector {
    urls: Vec<String>,
}

impl StaticSelector {
    /// Create a selector over a fixed URL list
    pub fn new(urls: Vec<String>) -> Self {
        Self { urls }
    }
}

impl ExpertSelector for StaticSelector {
    fn select(&self, _query: &str, _registry: &ExpertRegistry) -> Vec<String> {
        self.urls.clone()
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Selects experts whose URL or title shares terms with the query.
///
/// Candidates are ordered by match count descending, then URL ascending
/// for determinism. This selector imposes its own relevance order, which
/// the orchestrator passes through to the source list.
pub struct KeywordSelector {
    /// Cap on how many experts one query may fan out to
    max_experts: usize,
}

impl KeywordSelector {
    /// Create a selector consulting at most `max_experts` per query
    pub fn new(max_experts: usize) -> Self {
        Self { max_experts }
    }
}

impl ExpertSelector for KeywordSelector {
    fn select(&self, query: &str, registry: &ExpertRegistry) -> Vec<String> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.len() >= 3)
            .map(str::to_string)
            .collect();

        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, String)> = registry
            .list()
            .into_iter()
            .filter_map(|expert| {
                let haystack = format!(
                    "{} {}",
                    expert.url.to_lowercase(),
                    expert.title.to_lowercase()
                );
                let matches = terms.iter().filter(|t| haystack.contains(t.as_str())).count();
                (matches > 0).then(|| (matches, expert.url))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored
            .into_iter()
            .take(self.max_experts)
            .map(|(_, url)| url)
            .collect()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Expert, ExpertKind};
    use chrono::Utc;

    fn registry_with(entries: &[(&str, &str)]) -> ExpertRegistry {
        let registry = ExpertRegistry::new();
        for (url, title) in entries {
            registry.upsert(Expert {
                url: url.to_string(),
                title: title.to_string(),
                kind: ExpertKind::Simple,
                ingested_at: Utc::now(),
            });
        }
        registry
    }

    #[test]
    fn static_selector_returns_configured_order() {
        let selector = StaticSelector::new(vec![
            "https://b.example".to_string(),
            "https://a.example".to_string(),
        ]);
        let registry = ExpertRegistry::new();
        assert_eq!(
            selector.select("anything", &registry),
            vec!["https://b.example", "https://a.example"]
        );
    }

    #[test]
    fn keyword_selector_matches_url_and_title() {
        let registry = registry_with(&[
            ("https://rust.example", "The Rust Book"),
            ("https://go.example", "Go documentation"),
        ]);
        let selector = KeywordSelector::new(10);

        let selected = selector.select("what is rust ownership", &registry);
        assert_eq!(selected, vec!["https://rust.example"]);
    }

    #[test]
    fn keyword_selector_orders_by_match_count() {
        let registry = registry_with(&[
            ("https://one.example", "rust guide"),
            ("https://two.example", "rust ownership guide"),
        ]);
        let selector = KeywordSelector::new(10);

        let selected = selector.select("rust ownership guide", &registry);
        assert_eq!(selected[0], "https://two.example");
    }

    #[test]
    fn keyword_selector_respects_max_experts() {
        let registry = registry_with(&[
            ("https://a.example/rust", "a"),
            ("https://b.example/rust", "b"),
            ("https://c.example/rust", "c"),
        ]);
        let selector = KeywordSelector::new(2);

        assert_eq!(selector.select("rust", &registry).len(), 2);
    }

    #[test]
    fn empty_query_selects_nothing() {
        let registry = registry_with(&[("https://a.example", "a")]);
        let selector = KeywordSelector::new(10);
        assert!(selector.select("  ", &registry).is_empty());
    }
}
