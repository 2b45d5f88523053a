//! Upstream client configuration.

use std::fmt;

use islet_config::ProviderConfig;

use crate::UpstreamError;

/// Resolved upstream provider settings, API key included.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub timeout_secs: u64,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl UpstreamConfig {
    /// Resolve the config section into a ready-to-use client config.
    ///
    /// The API key is read from the environment variable named by
    /// `provider.api_key_env`; a missing key is a startup error, not a
    /// per-request one.
    pub fn from_provider(provider: &ProviderConfig) -> Result<Self, UpstreamError> {
        let api_key = std::env::var(&provider.api_key_env).map_err(|_| {
            UpstreamError::Api(format!(
                "{} not set — required for provider auth",
                provider.api_key_env
            ))
        })?;

        Ok(Self {
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: provider.model.clone(),
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
            timeout_secs: provider.timeout_secs,
        })
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}
