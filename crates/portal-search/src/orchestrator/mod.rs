//! Query orchestration: expert selection, fan-out, merge

pub mod selection;

pub use selection::{ExpertSelector, KeywordSelector, StaticSelector};

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};

use crate::config::PortalConfig;
use crate::error::{Error, Result};
use crate::registry::ExpertRegistry;
use crate::retrieval::ContextRetriever;
use crate::synthesis::AnswerSynthesizer;
use crate::types::{Expert, RetrievalResult, SearchAnswer};

/// Top-level query pipeline: select experts, retrieve in parallel,
/// synthesize one answer.
///
/// Per-expert failures are caught at the fan-out boundary and degrade
/// that expert only; the query fails as a whole only when every selected
/// expert failed or synthesis itself does.
pub struct QueryOrchestrator {
    selector: Arc<dyn ExpertSelector>,
    retriever: Arc<ContextRetriever>,
    synthesizer: AnswerSynthesizer,
    registry: Arc<ExpertRegistry>,
    max_concurrent: usize,
    deadline: Duration,
}

impl QueryOrchestrator {
    /// Create an orchestrator over shared pipeline components
    pub fn new(
        config: &PortalConfig,
        selector: Arc<dyn ExpertSelector>,
        retriever: Arc<ContextRetriever>,
        synthesizer: AnswerSynthesizer,
        registry: Arc<ExpertRegistry>,
    ) -> Self {
        Self {
            selector,
            retriever,
            synthesizer,
            registry,
            max_concurrent: config.orchestrator.max_concurrent_retrievals,
            deadline: Duration::from_secs(config.orchestrator.query_deadline_secs),
        }
    }

    /// Answer a query by consulting the selected experts.
    ///
    /// Retrievals run concurrently, bounded by the configured limit, and
    /// are cancelled cooperatively when the query deadline expires; an
    /// expert that misses the deadline counts as failed, not fatal.
    /// Returns `AllExpertsFailed` when no expert survives, never an
    /// answer with zero sources.
    pub async fn search(&self, query: &str) -> Result<SearchAnswer> {
        let deadline = Instant::now() + self.deadline;

        let selected = self.selector.select(query, &self.registry);
        tracing::info!(
            query,
            strategy = self.selector.name(),
            experts = selected.len(),
            "expert selection complete"
        );

        if selected.is_empty() {
            return Err(Error::AllExpertsFailed { attempted: 0 });
        }
        let attempted = selected.len();

        // buffered() preserves selection order in the collected output
        let retrievals: Vec<(String, Result<RetrievalResult>)> = stream::iter(selected)
            .map(|expert_url| {
                let retriever = Arc::clone(&self.retriever);
                let query = query.to_string();
                async move {
                    let result = match timeout_at(deadline, retriever.retrieve(&query, &expert_url))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(Error::DeadlineExceeded(format!(
                            "retrieval from {} missed the query deadline",
                            expert_url
                        ))),
                    };
                    (expert_url, result)
                }
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        let mut contributions: Vec<(Expert, RetrievalResult)> = Vec::new();
        for (expert_url, result) in retrievals {
            match result {
                Ok(retrieval) => match self.registry.get(&expert_url) {
                    Ok(expert) => contributions.push((expert, retrieval)),
                    Err(e) => {
                        tracing::warn!(expert_url = %expert_url, error = %e, "expert vanished after retrieval");
                    }
                },
                Err(e) if e.is_per_expert() => {
                    // Absent or failed experts are excluded, not fatal
                    tracing::warn!(expert_url = %expert_url, error = %e, "expert excluded from synthesis");
                }
                Err(e) => {
                    // Errors outside the retrieval taxonomy still only
                    // cost this expert, but they indicate a wiring bug
                    tracing::error!(expert_url = %expert_url, error = %e, "unexpected failure class during fan-out, expert excluded");
                }
            }
        }

        if contributions.is_empty() {
            return Err(Error::AllExpertsFailed { attempted });
        }

        tracing::info!(
            surviving = contributions.len(),
            attempted,
            "fan-out complete, synthesizing"
        );

        match timeout_at(deadline, self.synthesizer.synthesize(query, &contributions)).await {
            Ok(answer) => answer,
            Err(_) => Err(Error::DeadlineExceeded(
                "synthesis missed the query deadline".to_string(),
            )),
        }
    }
}
