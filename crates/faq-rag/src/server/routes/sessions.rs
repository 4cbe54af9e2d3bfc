//! Session lifecycle and chat turns

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::session::ChatSession;
use crate::types::ConversationMessage;

/// Body of `POST /api/sessions/:id/messages`
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    /// The question
    pub content: String,
    /// Chat model for this turn only
    #[serde(default)]
    pub model: Option<String>,
}

/// Messages appended by one turn
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub user: ConversationMessage,
    pub assistant: ConversationMessage,
    pub processing_time_ms: u64,
}

/// POST /api/sessions - start a session
pub async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<ChatSession>) {
    let session = ChatSession::new();
    tracing::info!(session = %session.id(), "Session started");

    state.sessions().await.insert(session.id(), session.clone());
    (StatusCode::CREATED, Json(session))
}

/// GET /api/sessions/:id - full history
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ChatSession>> {
    let sessions = state.sessions().await;
    sessions
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(Error::SessionNotFound(id))
}

/// DELETE /api/sessions/:id - end a session and drop its history
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .sessions()
        .await
        .remove(&id)
        .ok_or(Error::SessionNotFound(id))?;

    tracing::info!(session = %id, "Session ended");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/sessions/:id/messages - run one turn
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<TurnResponse>> {
    let start = Instant::now();

    if request.content.trim().is_empty() {
        return Err(Error::InvalidRequest("content must not be empty".to_string()));
    }

    let params = state.default_params().with_model(request.model.as_deref());

    let mut sessions = state.sessions().await;
    let session = sessions.get_mut(&id).ok_or(Error::SessionNotFound(id))?;

    let assistant = session
        .ask(state.pipeline(), &request.content, &params)
        .await?
        .clone();

    let messages = session.messages();
    let user = messages[messages.len() - 2].clone();

    Ok(Json(TurnResponse {
        user,
        assistant,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}
