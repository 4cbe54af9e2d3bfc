//! Prompt templates for RAG generation

use serde::Serialize;

use crate::providers::ChatMessage;
use crate::types::{Chunk, Role};

/// Persona and grounding instructions; the retrieved context is appended
/// after the last line.
pub const SYSTEM_TEMPLATE: &str = "You are a knowledgeable and friendly real estate assistant at Sunrise Realty Group.\n\
You help clients with questions about buying, selling, and renting homes.\n\
Use only the following information to answer clearly and professionally:\n";

/// Two-part prompt sent to the chat model for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    /// Template with the retrieved chunk text filled in
    pub system_instructions: String,
    /// The user's raw question
    pub question: String,
}

impl PromptRequest {
    /// `[system, user]` message pair
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Role::System, self.system_instructions.clone()),
            ChatMessage::new(Role::User, self.question.clone()),
        ]
    }
}

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Join chunk texts with blank lines
    pub fn build_context(chunks: &[Chunk]) -> String {
        chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Build the full RAG prompt
    pub fn build(chunks: &[Chunk], question: &str) -> PromptRequest {
        PromptRequest {
            system_instructions: format!("{}{}", SYSTEM_TEMPLATE, Self::build_context(chunks)),
            question: question.to_string(),
        }
    }
}
