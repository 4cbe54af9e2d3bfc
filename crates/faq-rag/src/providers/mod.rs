//! Provider abstractions for embeddings and chat completion
//!
//! The pipeline talks to these traits only; `OpenAiClient` is the production
//! implementation of both.

pub mod embedding;
pub mod llm;
pub mod openai;

pub use embedding::EmbeddingProvider;
pub use llm::{ChatMessage, ChatModel, GenerationParams};
pub use openai::OpenAiClient;
