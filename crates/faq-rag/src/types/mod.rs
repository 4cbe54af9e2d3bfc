//! Core types for the FAQ assistant

pub mod document;
pub mod message;

pub use document::{Chunk, Document, IndexEntry};
pub use message::{ConversationMessage, Role};
