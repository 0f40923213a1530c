//! Deterministic text chunking with overlap

use crate::config::ChunkingConfig;
use crate::types::Chunk;

/// Splits raw text into overlapping, bounded-size chunks.
///
/// Chunking is a pure function of its inputs: re-chunking identical text
/// always yields an identical chunk set, which re-ingestion relies on to
/// replace an expert's index reproducibly. Parameters are validated once
/// at startup (`PortalConfig::validate`), never per call.
pub struct TextChunker {
    /// Target chunk size in characters
    chunk_size: usize,
    /// Overlap carried into the next chunk, in characters
    overlap: usize,
}

impl TextChunker {
    /// Create a chunker from validated configuration
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            chunk_size: config.chunk_size,
            overlap: config.overlap,
        }
    }

    /// Chunk text into ordered spans.
    ///
    /// Windows are measured in characters so spans never split a UTF-8
    /// code point. Text shorter than the chunk size yields exactly one
    /// chunk holding the whole text.
    pub fn chunk(&self, expert_url: &str, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            let content: String = chars[start..end].iter().collect();

            chunks.push(Chunk {
                expert_url: expert_url.to_string(),
                chunk_index: chunks.len() as u32,
                content,
                char_start: start,
                char_end: end,
                embedding: Vec::new(),
            });

            if end == chars.len() {
                break;
            }
            // overlap < chunk_size guarantees forward progress
            start = end - self.overlap;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(chunk_size: usize, overlap: usize) -> TextChunker {
        TextChunker::new(&ChunkingConfig { chunk_size, overlap })
    }

    #[test]
    fn short_text_yields_one_chunk_with_whole_text() {
        let chunks = chunker(100, 10).chunk("https://a.example", "short text");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "short text");
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[0].char_start, 0);
        assert_eq!(chunks[0].char_end, 10);
    }

    #[test]
    fn chunking_is_deterministic() {
        let text = "lorem ipsum dolor sit amet ".repeat(50);
        let chunker = chunker(120, 20);
        let first = chunker.chunk("https://a.example", &text);
        let second = chunker.chunk("https://a.example", &text);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.content, b.content);
            assert_eq!(a.chunk_index, b.chunk_index);
            assert_eq!(a.char_start, b.char_start);
            assert_eq!(a.char_end, b.char_end);
        }
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let chunks = chunker(100, 20).chunk("https://a.example", &text);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].char_start, pair[0].char_end - 20);
            let tail: String = pair[0].content.chars().skip(80).collect();
            let head: String = pair[1].content.chars().take(20).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn chunk_indices_are_sequential() {
        let text = "abcdef".repeat(200);
        let chunks = chunker(100, 10).chunk("https://a.example", &text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as u32);
        }
    }

    #[test]
    fn final_chunk_reaches_end_of_text() {
        let text = "0123456789".repeat(35);
        let chunks = chunker(100, 25).chunk("https://a.example", &text);
        assert_eq!(chunks.last().unwrap().char_end, 350);
    }

    #[test]
    fn multibyte_text_never_splits_code_points() {
        let text = "héllø wörld ünïcodé ".repeat(30);
        let chunks = chunker(50, 10).chunk("https://a.example", &text);
        let total_chars = text.chars().count();
        assert_eq!(chunks.last().unwrap().char_end, total_chars);
        for chunk in &chunks {
            assert_eq!(chunk.content.chars().count(), chunk.char_end - chunk.char_start);
        }
    }
}
