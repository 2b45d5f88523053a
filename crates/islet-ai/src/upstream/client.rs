//! Upstream client struct, request building, and response parsing.

use islet_common::Turn;

use super::config::UpstreamConfig;

/// OpenAI-compatible chat completions client.
pub struct UpstreamClient {
    pub(crate) config: UpstreamConfig,
    pub(crate) http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self { config, http }
    }

    /// Build the JSON request body for the chat completions API.
    pub(crate) fn build_request_body(&self, messages: &[Turn]) -> serde_json::Value {
        let msgs: Vec<_> = messages
            .iter()
            .map(|m| {
                serde_json::json!({
                    "role": m.role,
                    "content": m.content,
                })
            })
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "messages": msgs,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "stream": false,
        })
    }

    /// Extract the first candidate reply text from a completions response.
    ///
    /// A response with no usable content yields an empty string; deciding
    /// what to substitute for it is the gateway's job, not ours.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> String {
        json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig {
            base_url: "https://api.deepseek.com".into(),
            api_key: "sk-test".into(),
            model: "deepseek-chat".into(),
            max_tokens: 2000,
            temperature: 0.8,
            timeout_secs: 30,
        })
    }

    #[test]
    fn request_body_shape() {
        let c = client();
        let messages = vec![Turn::system("人设"), Turn::user("你好")];
        let body = c.build_request_body(&messages);

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "你好");
    }

    #[test]
    fn request_body_keeps_history_order() {
        let c = client();
        let messages = vec![
            Turn::user("你好"),
            Turn::assistant("早"),
            Turn::user("在吗"),
        ];
        let body = c.build_request_body(&messages);
        let roles: Vec<_> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["role"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(roles, ["user", "assistant", "user"]);
    }

    #[test]
    fn parse_response_extracts_first_choice() {
        let c = client();
        let json = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "早"}}]
        });
        assert_eq!(c.parse_response(json), "早");
    }

    #[test]
    fn parse_response_without_content_is_empty() {
        let c = client();
        assert_eq!(c.parse_response(serde_json::json!({"choices": []})), "");
        assert_eq!(c.parse_response(serde_json::json!({})), "");
    }
}
