//! Upstream completion provider client.
//!
//! Implements the `ChatBackend` trait against an OpenAI-compatible
//! `/chat/completions` endpoint (DeepSeek by default) with bearer-token
//! auth, a fixed per-call timeout, and no client-side retry.

mod api;
mod client;
mod config;

pub use client::UpstreamClient;
pub use config::UpstreamConfig;
