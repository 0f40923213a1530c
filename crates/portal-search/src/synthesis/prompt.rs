//! Prompt templates for answer synthesis

use crate::types::{Expert, RetrievalResult};

/// Prompt builder for grounded answer synthesis
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build numbered context blocks, one per contributing expert.
    ///
    /// Each block carries that expert's retrieved contexts in rank order.
    pub fn build_context(contributions: &[(Expert, RetrievalResult)]) -> String {
        let mut context = String::new();

        for (i, (expert, result)) in contributions.iter().enumerate() {
            context.push_str(&format!("[{}] {} ({})\n\n", i + 1, expert.title, expert.url));
            for scored in &result.contexts {
                context.push_str(scored.content.trim());
                context.push_str("\n\n");
            }
            context.push_str("---\n\n");
        }

        context
    }

    /// Build the full synthesis prompt
    pub fn build_answer_prompt(query: &str, context: &str, sources: &str) -> String {
        format!(
            r#"You are a search assistant that answers using ONLY the provided source material.

RULES:
1. Use only information explicitly stated in the SOURCES below
2. If the sources do not answer the question, say so plainly
3. Do not use external knowledge or speculate beyond the sources
4. Write one coherent summary; when sources disagree, say which source claims what

SOURCES:
{context}

AVAILABLE SOURCES:
{sources}

QUESTION: {query}

Answer using only the source material above:"#,
            context = context,
            sources = sources,
            query = query,
        )
    }

    /// Format the numbered sources list for the prompt
    pub fn format_sources_list(contributions: &[(Expert, RetrievalResult)]) -> String {
        contributions
            .iter()
            .enumerate()
            .map(|(i, (expert, _))| format!("[{}] {} - {}", i + 1, expert.title, expert.url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Truncate a snippet to `max_len` bytes, preferring a word boundary
pub fn truncate_snippet(snippet: &str, max_len: usize) -> String {
    if snippet.len() <= max_len {
        return snippet.to_string();
    }

    let mut end = max_len;
    while end > 0 && !snippet.is_char_boundary(end) {
        end -= 1;
    }

    if let Some(pos) = snippet[..end].rfind(' ') {
        return format!("{}...", &snippet[..pos]);
    }

    format!("{}...", &snippet[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_snippet_is_unchanged() {
        assert_eq!(truncate_snippet("short", 100), "short");
    }

    #[test]
    fn long_snippet_truncates_at_word_boundary() {
        let snippet = "This is a very long snippet that needs to be truncated.";
        let truncated = truncate_snippet(snippet, 20);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 23);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let snippet = "ünïcodé".repeat(20);
        let truncated = truncate_snippet(&snippet, 30);
        assert!(truncated.ends_with("..."));
    }
}
