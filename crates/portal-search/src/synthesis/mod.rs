//! Answer synthesis from retrieved expert context

pub mod prompt;

pub use prompt::{truncate_snippet, PromptBuilder};

use std::sync::Arc;

use crate::error::Result;
use crate::providers::CompletionProvider;
use crate::types::{Expert, RetrievalResult, SearchAnswer, Source};

/// Maximum snippet length in a cited source
const SNIPPET_MAX_LEN: usize = 240;

/// Combines surviving per-expert retrievals into one answer with cited
/// sources.
///
/// Text generation is delegated to the completion capability; its
/// failure surfaces as a synthesis failure rather than an empty answer.
pub struct AnswerSynthesizer {
    completion: Arc<dyn CompletionProvider>,
}

impl AnswerSynthesizer {
    /// Create a synthesizer over a completion capability
    pub fn new(completion: Arc<dyn CompletionProvider>) -> Self {
        Self { completion }
    }

    /// Synthesize one answer from the contributing experts.
    ///
    /// Sources follow expert contribution order; each carries that
    /// expert's top-ranked context as its snippet. A single contributor
    /// is an ordinary case: the completion may legitimately return that
    /// expert's context verbatim.
    pub async fn synthesize(
        &self,
        query: &str,
        contributions: &[(Expert, RetrievalResult)],
    ) -> Result<SearchAnswer> {
        let context = PromptBuilder::build_context(contributions);
        let sources_list = PromptBuilder::format_sources_list(contributions);
        let prompt = PromptBuilder::build_answer_prompt(query, &context, &sources_list);

        tracing::debug!(
            experts = contributions.len(),
            prompt_len = prompt.len(),
            "synthesizing answer"
        );

        let summary = self.completion.complete(&prompt).await?;

        let sources = contributions
            .iter()
            .map(|(expert, result)| Source {
                url: expert.url.clone(),
                title: expert.title.clone(),
                snippet: result
                    .top_context()
                    .map(|c| truncate_snippet(&c.content, SNIPPET_MAX_LEN))
                    .unwrap_or_default(),
            })
            .collect();

        Ok(SearchAnswer { summary, sources })
    }
}
