//! Transport seam between the session client and the chat server.
//!
//! `SessionClient` only ever sees this trait, so tests drive it with canned
//! transports and the binary plugs in the real HTTP one.

use async_trait::async_trait;
use islet_common::{ChatRequest, ChatResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timeout")]
    Timeout,
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

/// HTTP transport against a running islet-server.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `server_url` is the server base, e.g. `http://127.0.0.1:3000`.
    pub fn new(server_url: &str) -> Self {
        // Slightly above the server's own 30s upstream timeout, so the
        // server gets to answer with its fallback before we give up.
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(5))
            .timeout(std::time::Duration::from_secs(35))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            endpoint: format!("{}/api/chat", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly_with_trailing_slash() {
        let t = HttpTransport::new("http://127.0.0.1:3000/");
        assert_eq!(t.endpoint, "http://127.0.0.1:3000/api/chat");
    }

    #[test]
    fn transport_error_display() {
        assert_eq!(
            TransportError::Status(502).to_string(),
            "server returned HTTP 502"
        );
        assert_eq!(TransportError::Timeout.to_string(), "request timeout");
    }
}
