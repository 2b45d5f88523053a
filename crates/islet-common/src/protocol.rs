//! Client/server wire protocol for the chat endpoint.
//!
//! Field names follow the wire format the web client established
//! (`conversationHistory`), so the serde renames here are load-bearing.

use serde::{Deserialize, Serialize};

use crate::types::Turn;

/// Sentinel message value that triggers conversation-reset semantics on the
/// server instead of a normal completion.
pub const RESET_MARKER: &str = "[RESET_CONVERSATION]";

/// Body of `POST /api/chat`.
///
/// `conversation_history` is the client's full history snapshot at send time;
/// the server derives its own bounded window from it and never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(rename = "conversationHistory", default)]
    pub conversation_history: Vec<Turn>,
}

/// Successful response body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}
