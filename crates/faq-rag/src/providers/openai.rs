//! OpenAI-compatible HTTP client for embeddings and chat completion
//!
//! Works against any server exposing `/embeddings` and `/chat/completions`
//! in the OpenAI wire format. Failures are returned as-is: there is no retry.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};

use super::embedding::EmbeddingProvider;
use super::llm::{ChatMessage, ChatModel, GenerationParams};

/// OpenAI API client
pub struct OpenAiClient {
    /// HTTP client
    client: Client,
    /// API base URL
    base_url: String,
    /// Bearer credential
    api_key: Option<String>,
    /// Embedding model
    embed_model: String,
    /// Maximum texts per embedding request
    batch_size: usize,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    /// Create a new client
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            embed_model: config.embed_model.clone(),
            batch_size: config.embed_batch_size.max(1),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Attach the bearer header, or report the credential as missing
    fn authorize(&self, req: RequestBuilder) -> std::result::Result<RequestBuilder, String> {
        match &self.api_key {
            Some(key) => Ok(req.bearer_auth(key)),
            None => Err("no API key configured (set OPENAI_API_KEY)".to_string()),
        }
    }

    async fn embed_request(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            model: &self.embed_model,
            input: texts,
        };

        let req = self
            .authorize(self.client.post(self.endpoint("embeddings")))
            .map_err(Error::Embedding)?;

        let response = req
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Embedding failed: HTTP {} - {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse embedding response: {}", e)))?;

        collect_embeddings(embed_response, texts.len())
    }
}

/// Order embeddings by their reported index and check the count
fn collect_embeddings(response: EmbedResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut data = response.data;
    if data.len() != expected {
        return Err(Error::Embedding(format!(
            "Expected {} embeddings, got {}",
            expected,
            data.len()
        )));
    }
    data.sort_by_key(|d| d.index);
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

/// Pull the reply text out of a chat-completion response
fn extract_answer(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| Error::Generation("Malformed response: no message content".to_string()))
}

#[async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            tracing::debug!("Embedding batch of {} texts", batch.len());
            all_embeddings.extend(self.embed_request(batch).await?);
        }
        Ok(all_embeddings)
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_request(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| Error::Embedding("No embedding in response".to_string()))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String> {
        tracing::info!("Generating answer with model: {}", params.model);

        let request = ChatRequest {
            model: &params.model,
            messages,
            temperature: params.temperature,
        };

        let req = self
            .authorize(self.client.post(self.endpoint("chat/completions")))
            .map_err(Error::Generation)?;

        let response = req
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("Failed to parse generation response: {}", e)))?;

        extract_answer(chat_response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
