//! Configuration for the FAQ assistant
//!
//! Values come from three layers, later layers winning: built-in defaults, an
//! optional TOML file, then environment variables (a `.env` file is loaded into
//! the environment by the binaries before this runs).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "FAQ_RAG_CONFIG";

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Plain-text FAQ document, re-read on every query
    pub source_path: PathBuf,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Retrieval configuration
    pub retrieval: RetrievalConfig,
    /// Embedding and chat-completion service configuration
    pub llm: LlmConfig,
    /// Chat server configuration
    pub server: ServerConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("./docs/faq_real_estate.txt"),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Maximum chunk length in characters
    pub chunk_size: usize,
    /// Characters shared by consecutive chunks
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            chunk_overlap: 0,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Number of chunks handed to the chat model
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// OpenAI-compatible service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// API credential; calls fail at first use when absent
    pub api_key: Option<String>,
    /// Embedding model name
    pub embed_model: String,
    /// Default chat model name
    pub generate_model: String,
    /// Sampling temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds; unset leaves the HTTP client's default
    pub timeout_secs: Option<u64>,
    /// Maximum texts per embedding request
    pub embed_batch_size: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            embed_model: "text-embedding-ada-002".to_string(),
            generate_model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            timeout_secs: None,
            embed_batch_size: 512,
        }
    }
}

/// Chat server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Allow cross-origin API calls. The chat page itself is same-origin.
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            enable_cors: false,
        }
    }
}

impl RagConfig {
    /// Load configuration: defaults, then `path` (or `FAQ_RAG_CONFIG`), then
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from a key lookup (the process environment in practice)
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = get("OPENAI_BASE_URL") {
            self.llm.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("LANGUAGE_MODEL") {
            self.llm.generate_model = model;
        }
        if let Some(model) = get("EMBEDDING_MODEL") {
            self.llm.embed_model = model;
        }
        if let Some(source) = get("FAQ_RAG_SOURCE") {
            self.source_path = PathBuf::from(source);
        }
        if let Some(top_k) = get("FAQ_RAG_TOP_K").and_then(|v| v.parse().ok()) {
            self.retrieval.top_k = top_k;
        }
        if let Some(host) = get("FAQ_RAG_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("FAQ_RAG_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be greater than 0".to_string()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.retrieval.top_k == 0 {
            return Err(Error::Config("top_k must be greater than 0".to_string()));
        }
        if self.llm.embed_batch_size == 0 {
            return Err(Error::Config(
                "embed_batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether an API credential is configured
    pub fn has_api_key(&self) -> bool {
        self.llm
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
