//! Chat model trait and request types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::error::Result;
use crate::types::Role;

/// One message of a chat-completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Per-call model selection, passed explicitly with every query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Chat model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
}

impl GenerationParams {
    /// Defaults from configuration
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            model: config.generate_model.clone(),
            temperature: config.temperature,
        }
    }

    /// Same params with a different model, when an override is given
    pub fn with_model(&self, model: Option<&str>) -> Self {
        match model.map(str::trim).filter(|m| !m.is_empty()) {
            Some(model) => Self {
                model: model.to_string(),
                temperature: self.temperature,
            },
            None => self.clone(),
        }
    }
}

/// Trait for chat-completion models
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the messages and return the text of the model's reply
    async fn complete(&self, messages: &[ChatMessage], params: &GenerationParams)
        -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
