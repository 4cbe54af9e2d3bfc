//! Brute-force cosine index, built fresh for every query

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::types::{Chunk, IndexEntry};

/// Search result with chunk and similarity
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query (-1.0..=1.0, higher is better)
    pub similarity: f32,
}

/// Immutable set of embedded chunks. No insertion, deletion or persistence.
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from scratch. All vectors must share one dimension.
    pub fn build(entries: Vec<IndexEntry>) -> Result<Self> {
        let dimensions = entries.first().map_or(0, |e| e.vector.len());

        if let Some(bad) = entries.iter().find(|e| e.vector.len() != dimensions) {
            return Err(Error::vector_index(format!(
                "chunk {} has {} dimensions, expected {}",
                bad.chunk.order_index,
                bad.vector.len(),
                dimensions
            )));
        }

        Ok(Self {
            entries,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `k` entries most similar to `query`, most similar first.
    /// Equal scores keep document order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimensions {
            return Err(Error::vector_index(format!(
                "query has {} dimensions, index has {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|entry| SearchResult {
                chunk: entry.chunk.clone(),
                similarity: cosine_similarity(query, &entry.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.chunk.order_index.cmp(&b.chunk.order_index))
        });
        results.truncate(k);

        Ok(results)
    }

    /// Chunks of [`Self::search`] without scores
    pub fn retrieve(&self, query: &[f32], k: usize) -> Result<Vec<Chunk>> {
        Ok(self
            .search(query, k)?
            .into_iter()
            .map(|r| r.chunk)
            .collect())
    }
}

/// Cosine similarity; 0.0 when either vector has zero length
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
