//! Expert classification from raw content

use crate::types::ExpertType;

/// Decide whether a document becomes a simple or retrieval-augmented
/// expert.
///
/// Pure function of content length against the configured threshold:
/// content strictly longer than `rag_threshold` bytes is chunked and
/// indexed, anything else (empty text included) is stored verbatim.
/// Length at exactly the threshold classifies as simple.
pub fn classify(content: &str, rag_threshold: usize) -> ExpertType {
    if content.len() > rag_threshold {
        ExpertType::RetrievalAugmented
    } else {
        ExpertType::Simple
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_content_is_simple() {
        assert_eq!(classify("hello", 4096), ExpertType::Simple);
    }

    #[test]
    fn empty_content_is_simple() {
        assert_eq!(classify("", 4096), ExpertType::Simple);
    }

    #[test]
    fn content_at_threshold_is_simple() {
        let content = "x".repeat(4096);
        assert_eq!(classify(&content, 4096), ExpertType::Simple);
    }

    #[test]
    fn content_over_threshold_is_retrieval_augmented() {
        let content = "x".repeat(4097);
        assert_eq!(classify(&content, 4096), ExpertType::RetrievalAugmented);
    }
}
