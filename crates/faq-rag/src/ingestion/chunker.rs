//! Fixed-size character windowing

use crate::config::ChunkingConfig;
use crate::error::{Error, Result};
use crate::types::{Chunk, Document};

/// Splits text into windows of at most `chunk_size` characters, each window
/// starting `chunk_size - overlap` characters after the previous one.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    /// Maximum chunk length in characters
    chunk_size: usize,
    /// Characters repeated at the start of the next chunk
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. `overlap` must be smaller than `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than 0".to_string()));
        }
        if overlap >= chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                overlap, chunk_size
            )));
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Create from configuration
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Chunk a loaded document
    pub fn chunk_document(&self, doc: &Document) -> Vec<Chunk> {
        self.chunk_text(&doc.content)
    }

    /// Chunk raw text. Empty text yields no chunks; text no longer than
    /// `chunk_size` yields a single chunk equal to the input.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        // Window on char boundaries so multi-byte text never splits mid-character
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;
        let stride = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < char_count {
            let end = (start + self.chunk_size).min(char_count);
            let slice = &text[boundaries[start]..boundaries[end]];
            chunks.push(Chunk::new(slice, chunks.len()));

            if end == char_count {
                break;
            }
            start += stride;
        }

        chunks
    }
}
