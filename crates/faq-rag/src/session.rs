//! Conversation sessions
//!
//! A session owns its history outright. Front-ends create one per user (or
//! per terminal run), pass it into each turn, and drop it when the user
//! leaves. History only grows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::pipeline::RagPipeline;
use crate::providers::GenerationParams;
use crate::types::ConversationMessage;

/// System message every session starts with. It is kept in history only and
/// never reaches the RAG prompt, which carries its own instructions.
pub const SEED_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// One conversation
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    messages: Vec<ConversationMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Start a session seeded with the system message
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            messages: vec![ConversationMessage::system(SEED_SYSTEM_PROMPT)],
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Full history in chronological order, seed message included
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Run one turn: record the question, answer it through the pipeline and
    /// record the answer.
    ///
    /// On failure the question stays in history and no assistant message is
    /// added; the caller decides whether to show the error and carry on.
    pub async fn ask(
        &mut self,
        pipeline: &RagPipeline,
        question: &str,
        params: &GenerationParams,
    ) -> Result<&ConversationMessage> {
        self.messages.push(ConversationMessage::user(question));

        let id = self.id;
        let answer = pipeline.query(question, params).await.map_err(|e| {
            tracing::error!(session = %id, "Turn failed: {}", e);
            e
        })?;

        let slot = self.messages.len();
        self.messages.push(ConversationMessage::assistant(answer));
        Ok(&self.messages[slot])
    }
}
