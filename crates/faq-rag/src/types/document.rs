//! Document, chunk and index entry types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw source document, read once per query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path the document was read from
    pub source_path: PathBuf,
    /// Full UTF-8 text content
    pub content: String,
}

impl Document {
    /// Create a new document
    pub fn new(source_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            content: content.into(),
        }
    }

    /// Length of the content in characters
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Bounded slice of a document, the unit of retrieval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub text: String,
    /// Position of the chunk within its document
    pub order_index: usize,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: impl Into<String>, order_index: usize) -> Self {
        Self {
            text: text.into(),
            order_index,
        }
    }
}

/// A chunk paired with its embedding vector
#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub chunk: Chunk,
    pub vector: Vec<f32>,
}

impl IndexEntry {
    pub fn new(chunk: Chunk, vector: Vec<f32>) -> Self {
        Self { chunk, vector }
    }
}
