//! Deterministic stand-ins for the network providers, for tests only

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::providers::{ChatMessage, ChatModel, EmbeddingProvider, GenerationParams};

const DIMENSIONS: usize = 64;

/// Bag-of-words embedder: each lowercase word bumps one hashed bucket, so
/// texts sharing words score higher under cosine similarity.
#[derive(Default)]
pub struct HashingEmbedder {
    batch_calls: AtomicUsize,
    query_calls: AtomicUsize,
    fail: bool,
}

impl HashingEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    pub fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0; DIMENSIONS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            // FNV-1a
            let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
            for byte in word.bytes() {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(0x0100_0000_01b3);
            }
            v[(hash % DIMENSIONS as u64) as usize] += 1.0;
        }
        v
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::embedding("HTTP 429 Too Many Requests"));
        }
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::embedding("HTTP 429 Too Many Requests"));
        }
        Ok(Self::vector(text))
    }

    fn name(&self) -> &str {
        "hashing"
    }
}

/// Chat model that records every request and replies with a fixed answer
pub struct RecordingChatModel {
    answer: Option<String>,
    calls: Mutex<Vec<(Vec<ChatMessage>, GenerationParams)>>,
}

impl RecordingChatModel {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Vec<ChatMessage>, GenerationParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for RecordingChatModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), params.clone()));
        self.answer
            .clone()
            .ok_or_else(|| Error::generation("HTTP 401 Unauthorized"))
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Write `content` to a fresh temp dir and return both
pub fn faq_file(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faq.txt");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
