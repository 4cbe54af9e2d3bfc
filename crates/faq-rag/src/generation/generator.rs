//! Response generator: prompt in, answer text out

use std::sync::Arc;

use crate::error::Result;
use crate::providers::{ChatModel, GenerationParams};
use crate::types::Chunk;

use super::prompt::{PromptBuilder, PromptRequest};

/// Formats retrieved chunks and the question into a prompt and asks the
/// chat model for an answer
pub struct ResponseGenerator {
    model: Arc<dyn ChatModel>,
}

impl ResponseGenerator {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Generate an answer grounded in `chunks`. An empty slice still sends a
    /// well-formed prompt with an empty context block.
    pub async fn generate(
        &self,
        chunks: &[Chunk],
        question: &str,
        params: &GenerationParams,
    ) -> Result<String> {
        let prompt = PromptBuilder::build(chunks, question);
        self.generate_from_prompt(&prompt, params).await
    }

    /// Send an already-built prompt
    pub async fn generate_from_prompt(
        &self,
        prompt: &PromptRequest,
        params: &GenerationParams,
    ) -> Result<String> {
        tracing::debug!(
            "Prompt: {} context chars via {}",
            prompt.system_instructions.len(),
            self.model.name()
        );
        self.model.complete(&prompt.to_messages(), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::error::Error;
    use crate::generation::prompt::SYSTEM_TEMPLATE;
    use crate::test_support::RecordingChatModel;
    use crate::types::Role;

    #[tokio::test]
    async fn test_generate_with_empty_retrieval() {
        let model = Arc::new(RecordingChatModel::answering("No idea."));
        let generator = ResponseGenerator::new(model.clone());
        let params = GenerationParams::from_config(&LlmConfig::default());

        let answer = generator.generate(&[], "X", &params).await.unwrap();
        assert_eq!(answer, "No idea.");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        let (messages, used) = &calls[0];
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_TEMPLATE);
        assert_eq!(messages[1].content, "X");
        assert_eq!(used.model, "gpt-3.5-turbo");
    }

    #[tokio::test]
    async fn test_generation_error_propagates() {
        let model = Arc::new(RecordingChatModel::failing());
        let generator = ResponseGenerator::new(model);
        let params = GenerationParams::from_config(&LlmConfig::default());

        let err = generator
            .generate(&[Chunk::new("ctx", 0)], "Q?", &params)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Generation(_)));
    }
}
