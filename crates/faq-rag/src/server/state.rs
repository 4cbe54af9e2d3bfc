//! Application state for the chat server

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::config::RagConfig;
use crate::pipeline::RagPipeline;
use crate::providers::GenerationParams;
use crate::session::ChatSession;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Query pipeline
    pipeline: RagPipeline,
    /// Default generation parameters
    params: GenerationParams,
    /// Live sessions. Turns hold this lock for their whole pipeline run, so
    /// queries are processed one at a time.
    sessions: Mutex<HashMap<Uuid, ChatSession>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: RagConfig, pipeline: RagPipeline) -> Self {
        let params = GenerationParams::from_config(&config.llm);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                params,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn pipeline(&self) -> &RagPipeline {
        &self.inner.pipeline
    }

    pub fn default_params(&self) -> &GenerationParams {
        &self.inner.params
    }

    /// Lock the session table
    pub async fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, ChatSession>> {
        self.inner.sessions.lock().await
    }
}
