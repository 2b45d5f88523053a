//! Configuration schema types for islet.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching the shipped template.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the islet server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IsletConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub persona: PersonaConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
        }
    }
}

/// Upstream completion provider configuration.
///
/// The API key itself never lives in the TOML file — `api_key_env` names the
/// environment variable it is read from at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Total per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".into(),
            model: "deepseek-chat".into(),
            api_key_env: "AI_API_KEY".into(),
            max_tokens: 2000,
            temperature: 0.8,
            timeout_secs: 30,
        }
    }
}

/// Persona section: who the assistant is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    pub name: String,
    pub age: u32,
    /// Path to the character profile text. When unset, the built-in profile
    /// shipped with this crate is used.
    pub profile_path: Option<PathBuf>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: "沈屿".into(),
            age: 24,
            profile_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_template() {
        let config = IsletConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.provider.base_url, "https://api.deepseek.com");
        assert_eq!(config.provider.api_key_env, "AI_API_KEY");
        assert_eq!(config.provider.max_tokens, 2000);
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.persona.name, "沈屿");
        assert_eq!(config.persona.age, 24);
        assert!(config.persona.profile_path.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: IsletConfig = toml::from_str(
            r#"
[server]
port = 8080
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.provider.model, "deepseek-chat");
    }
}
