//! Server-side conversation core for islet.
//!
//! Provides:
//! - The persona prompt builder: system prompt + bounded history window
//! - The completion gateway: one upstream call, normalized to a safe reply
//!   string no matter what the provider does
//! - An OpenAI-compatible upstream HTTP client behind the `ChatBackend` trait

pub mod gateway;
pub mod prompt;
pub mod upstream;

use async_trait::async_trait;
use islet_common::Turn;

pub use gateway::CompletionGateway;
pub use prompt::PromptBuilder;
pub use upstream::{UpstreamClient, UpstreamConfig};

/// A completion backend: takes a full message sequence, returns one reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, messages: &[Turn]) -> Result<String, UpstreamError>;
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Timeout")]
    Timeout,
}
