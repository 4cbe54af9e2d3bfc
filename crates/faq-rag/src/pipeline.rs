//! Query pipeline: load, split, embed, index, retrieve, generate
//!
//! Nothing is cached between calls. Each question re-reads the source file
//! and rebuilds the index, so edits to the FAQ show up on the next question.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::{PromptBuilder, PromptRequest, ResponseGenerator};
use crate::ingestion::{load_document, TextChunker};
use crate::providers::{ChatModel, EmbeddingProvider, GenerationParams, OpenAiClient};
use crate::retrieval::{SearchResult, VectorIndex};
use crate::types::{Chunk, IndexEntry};

/// Everything one query produced, for callers that want more than the answer
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Model answer text
    pub answer: String,
    /// Retrieved chunks with scores, most similar first
    pub retrieved: Vec<SearchResult>,
    /// The exact prompt sent to the chat model
    pub prompt: PromptRequest,
}

/// The RAG chain over one source document
pub struct RagPipeline {
    source_path: PathBuf,
    chunker: TextChunker,
    top_k: usize,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: ResponseGenerator,
}

impl RagPipeline {
    /// Create a pipeline over explicit providers
    pub fn new(
        config: &RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        model: Arc<dyn ChatModel>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source_path: config.source_path.clone(),
            chunker: TextChunker::from_config(&config.chunking)?,
            top_k: config.retrieval.top_k,
            embedder,
            generator: ResponseGenerator::new(model),
        })
    }

    /// Create a pipeline backed by the OpenAI-compatible client
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        if !config.has_api_key() {
            tracing::warn!("No API key configured; embedding and generation calls will fail");
        }
        let client = Arc::new(OpenAiClient::new(&config.llm)?);
        Self::new(config, client.clone(), client)
    }

    /// Path of the source document
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Number of chunks retrieved per question
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Answer a question
    pub async fn query(&self, question: &str, params: &GenerationParams) -> Result<String> {
        Ok(self.query_traced(question, params).await?.answer)
    }

    /// Answer a question and return the retrieval and prompt details
    pub async fn query_traced(
        &self,
        question: &str,
        params: &GenerationParams,
    ) -> Result<QueryOutcome> {
        let start = Instant::now();
        tracing::info!("Query: \"{}\"", question);

        let index = self.build_index().await?;

        let query_vector = self.embedder.embed_one(question).await?;
        let retrieved = index.search(&query_vector, self.top_k)?;
        for hit in &retrieved {
            tracing::debug!(
                "Retrieved chunk {} (similarity {:.3})",
                hit.chunk.order_index,
                hit.similarity
            );
        }

        let chunks: Vec<Chunk> = retrieved.iter().map(|r| r.chunk.clone()).collect();
        let prompt = PromptBuilder::build(&chunks, question);
        let answer = self.generator.generate_from_prompt(&prompt, params).await?;

        tracing::info!(
            "Query completed in {}ms, {} chunks retrieved",
            start.elapsed().as_millis(),
            retrieved.len()
        );

        Ok(QueryOutcome {
            answer,
            retrieved,
            prompt,
        })
    }

    /// Read, split and embed the source document into a fresh index
    async fn build_index(&self) -> Result<VectorIndex> {
        let document = load_document(&self.source_path).await?;
        let chunks = self.chunker.chunk_document(&document);
        tracing::debug!(
            "Split {} ({} chars) into {} chunks",
            document.source_path.display(),
            document.char_len(),
            chunks.len()
        );

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;
        if vectors.len() != chunks.len() {
            return Err(Error::embedding(format!(
                "{} returned {} vectors for {} chunks",
                self.embedder.name(),
                vectors.len(),
                chunks.len()
            )));
        }

        let entries = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| IndexEntry::new(chunk, vector))
            .collect();
        VectorIndex::build(entries)
    }
}
