//! ChatBackend trait implementation for UpstreamClient.

use async_trait::async_trait;
use islet_common::Turn;
use tracing::debug;

use crate::{ChatBackend, UpstreamError};

use super::client::UpstreamClient;

#[async_trait]
impl ChatBackend for UpstreamClient {
    async fn send_message(&self, messages: &[Turn]) -> Result<String, UpstreamError> {
        let body = self.build_request_body(messages);

        debug!(model = %self.config.model, messages = messages.len(), "upstream completion request");

        let response = self
            .http
            .post(self.config.completions_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key),
            )
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(UpstreamError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(UpstreamError::Api(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Parse(e.to_string())
            }
        })?;

        Ok(self.parse_response(json))
    }
}
