//! Completion gateway: one upstream call, normalized to a safe reply.
//!
//! The gateway never surfaces an error to its caller. Every failure mode —
//! rate limit, timeout, transport error, unusable response — resolves to a
//! fixed in-character string, so the persona never breaks character over a
//! technical fault. The original cause is logged here and goes no further.

use std::sync::Arc;

use islet_common::Turn;
use tracing::{debug, warn};

use crate::{ChatBackend, UpstreamError};

/// Maximum reply length in characters. Longer replies are cut to this budget
/// and marked with an ellipsis; short message-app-style replies are part of
/// the persona contract.
pub const REPLY_CHAR_BUDGET: usize = 100;

/// Marker appended to a truncated reply.
pub const ELLIPSIS: &str = "...";

/// Substituted when the provider answers but the reply is empty or blank.
pub const EMPTY_REPLY_FALLBACK: &str = "抱歉，我现在有点忙，晚点回复你。";

/// Empty-reply substitute on the reset path, phrased as a fresh start.
pub const RESET_EMPTY_FALLBACK: &str = "那个…你好，我们重新开始吧？";

/// Fixed reply when the provider rate-limits us.
pub const RATE_LIMITED_REPLY: &str = "消息发得太快了，等一下再发吧。";

/// Fixed reply when the upstream call times out.
pub const TIMEOUT_REPLY: &str = "网络有点问题，再发一次试试？";

/// Fixed reply for every other upstream failure.
pub const BUSY_REPLY: &str = "现在有点忙，晚点聊。";

/// Makes the single upstream model call and maps every outcome to a reply
/// string. Stateless; safe to share across requests.
#[derive(Clone)]
pub struct CompletionGateway {
    backend: Arc<dyn ChatBackend>,
}

impl CompletionGateway {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Issue one upstream call for `messages` and return a renderable reply.
    ///
    /// `empty_fallback` is substituted when the provider returns nothing
    /// usable (callers pass [`EMPTY_REPLY_FALLBACK`] or
    /// [`RESET_EMPTY_FALLBACK`] depending on the request kind).
    ///
    /// Post-condition: the returned string never exceeds
    /// `REPLY_CHAR_BUDGET` characters plus the ellipsis marker.
    pub async fn reply(&self, messages: &[Turn], empty_fallback: &str) -> String {
        match self.backend.send_message(messages).await {
            Ok(text) => {
                if text.trim().is_empty() {
                    debug!("upstream returned empty reply, substituting fallback");
                    return empty_fallback.to_string();
                }
                cap_reply(&text)
            }
            Err(e) => {
                warn!(error = %e, "upstream completion failed");
                match e {
                    UpstreamError::RateLimited => RATE_LIMITED_REPLY.to_string(),
                    UpstreamError::Timeout => TIMEOUT_REPLY.to_string(),
                    UpstreamError::Api(_) | UpstreamError::Network(_) | UpstreamError::Parse(_) => {
                        BUSY_REPLY.to_string()
                    }
                }
            }
        }
    }
}

/// Enforce the reply length budget: at most `REPLY_CHAR_BUDGET` characters,
/// with a trailing ellipsis when anything was cut.
fn cap_reply(reply: &str) -> String {
    let mut chars = reply.chars();
    let capped: String = chars.by_ref().take(REPLY_CHAR_BUDGET).collect();
    if chars.next().is_none() {
        capped
    } else {
        format!("{capped}{ELLIPSIS}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Backend returning a canned result, one per call.
    struct FixedBackend(Result<String, UpstreamError>);

    #[async_trait]
    impl ChatBackend for FixedBackend {
        async fn send_message(&self, _messages: &[Turn]) -> Result<String, UpstreamError> {
            match &self.0 {
                Ok(s) => Ok(s.clone()),
                Err(UpstreamError::RateLimited) => Err(UpstreamError::RateLimited),
                Err(UpstreamError::Timeout) => Err(UpstreamError::Timeout),
                Err(UpstreamError::Api(s)) => Err(UpstreamError::Api(s.clone())),
                Err(UpstreamError::Network(s)) => Err(UpstreamError::Network(s.clone())),
                Err(UpstreamError::Parse(s)) => Err(UpstreamError::Parse(s.clone())),
            }
        }
    }

    fn gateway(result: Result<String, UpstreamError>) -> CompletionGateway {
        CompletionGateway::new(Arc::new(FixedBackend(result)))
    }

    #[tokio::test]
    async fn short_reply_passes_through() {
        let g = gateway(Ok("早".into()));
        assert_eq!(g.reply(&[], EMPTY_REPLY_FALLBACK).await, "早");
    }

    #[tokio::test]
    async fn long_reply_is_capped_at_budget_plus_ellipsis() {
        let long: String = "好".repeat(REPLY_CHAR_BUDGET + 1);
        let g = gateway(Ok(long));
        let reply = g.reply(&[], EMPTY_REPLY_FALLBACK).await;
        assert_eq!(reply.chars().count(), REPLY_CHAR_BUDGET + ELLIPSIS.len());
        assert!(reply.ends_with(ELLIPSIS));
    }

    #[tokio::test]
    async fn reply_at_exact_budget_is_untouched() {
        let exact: String = "好".repeat(REPLY_CHAR_BUDGET);
        let g = gateway(Ok(exact.clone()));
        assert_eq!(g.reply(&[], EMPTY_REPLY_FALLBACK).await, exact);
    }

    #[tokio::test]
    async fn blank_reply_substitutes_fallback() {
        let g = gateway(Ok("   \n".into()));
        assert_eq!(
            g.reply(&[], EMPTY_REPLY_FALLBACK).await,
            EMPTY_REPLY_FALLBACK
        );
    }

    #[tokio::test]
    async fn blank_reply_on_reset_uses_reset_fallback() {
        let g = gateway(Ok(String::new()));
        assert_eq!(
            g.reply(&[], RESET_EMPTY_FALLBACK).await,
            RESET_EMPTY_FALLBACK
        );
    }

    #[tokio::test]
    async fn rate_limit_maps_to_fixed_reply() {
        let g = gateway(Err(UpstreamError::RateLimited));
        assert_eq!(g.reply(&[], EMPTY_REPLY_FALLBACK).await, RATE_LIMITED_REPLY);
    }

    #[tokio::test]
    async fn timeout_maps_to_fixed_reply() {
        let g = gateway(Err(UpstreamError::Timeout));
        assert_eq!(g.reply(&[], EMPTY_REPLY_FALLBACK).await, TIMEOUT_REPLY);
    }

    #[tokio::test]
    async fn other_failures_map_to_busy_reply() {
        for err in [
            UpstreamError::Api("HTTP 500".into()),
            UpstreamError::Network("connection refused".into()),
            UpstreamError::Parse("not json".into()),
        ] {
            let g = gateway(Err(err));
            assert_eq!(g.reply(&[], EMPTY_REPLY_FALLBACK).await, BUSY_REPLY);
        }
    }

    #[test]
    fn cap_reply_counts_characters_not_bytes() {
        // 101 CJK characters is far more than 100 bytes; only the character
        // count matters for the budget.
        let long: String = "屿".repeat(REPLY_CHAR_BUDGET + 1);
        let capped = cap_reply(&long);
        assert_eq!(
            capped.chars().count(),
            REPLY_CHAR_BUDGET + ELLIPSIS.len()
        );
    }
}
