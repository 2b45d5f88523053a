//! HTTP route handlers for the chat API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use islet_ai::gateway::{EMPTY_REPLY_FALLBACK, RESET_EMPTY_FALLBACK};
use islet_ai::{CompletionGateway, PromptBuilder};
use islet_common::{ChatRequest, ChatResponse, RESET_MARKER};
use tracing::info;

/// Shared state for all handlers.
pub struct AppState {
    pub prompt: PromptBuilder,
    pub gateway: CompletionGateway,
}

/// `POST /api/chat` — one conversational exchange.
///
/// The reset marker routes through the same endpoint; the prompt builder
/// discards the submitted history on that path. The gateway never fails, so
/// the only non-2xx outcome here is input validation.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    if req.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let is_reset = req.message == RESET_MARKER;
    if is_reset {
        info!("conversation reset requested");
    }

    let messages = state.prompt.build(&req.conversation_history, &req.message);
    let empty_fallback = if is_reset {
        RESET_EMPTY_FALLBACK
    } else {
        EMPTY_REPLY_FALLBACK
    };
    let reply = state.gateway.reply(&messages, empty_fallback).await;

    Ok(Json(ChatResponse { reply }))
}

/// `GET /api/health` — liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
