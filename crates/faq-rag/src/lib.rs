//! faq-rag: question answering over a single FAQ document
//!
//! Every question runs the whole retrieval-augmented generation chain from
//! scratch: the FAQ file is read, split into fixed-size chunks, embedded into a
//! throwaway in-memory index, the closest chunks are retrieved and handed to a
//! chat model as its only source of truth. Two front-ends drive the chain: a
//! terminal loop (`faq-rag-cli`) and a one-page web chat (`faq-rag-server`).

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod repl;
pub mod retrieval;
pub mod server;
pub mod session;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::{QueryOutcome, RagPipeline};
pub use session::ChatSession;
pub use types::{
    document::{Chunk, Document},
    message::{ConversationMessage, Role},
};
