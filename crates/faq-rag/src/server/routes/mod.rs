//! API routes for the chat server

pub mod sessions;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/:id",
            get(sessions::get_session).delete(sessions::end_session),
        )
        .route("/sessions/:id/messages", post(sessions::send_message))
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.config();
    Json(serde_json::json!({
        "name": "faq-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "FAQ question answering with retrieval-augmented generation",
        "source": config.source_path.display().to_string(),
        "models": {
            "embedding": config.llm.embed_model,
            "chat": config.llm.generate_model,
        },
        "top_k": state.pipeline().top_k(),
        "endpoints": {
            "POST /api/sessions": "Start a chat session",
            "GET /api/sessions/:id": "Conversation history",
            "POST /api/sessions/:id/messages": "Ask a question",
            "DELETE /api/sessions/:id": "End a chat session",
        }
    }))
}
