//! In-memory vector index and top-k retrieval

mod index;

pub use index::{cosine_similarity, SearchResult, VectorIndex};
