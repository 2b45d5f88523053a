//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Islet Configuration
# Only override what you want to change -- missing fields use defaults.

[server]
# host = "127.0.0.1"
# port = 3000

[provider]
# base_url = "https://api.deepseek.com"
# model = "deepseek-chat"
# api_key_env = "AI_API_KEY"   # env var the API key is read from
# max_tokens = 2000
# temperature = 0.8
# timeout_secs = 30

[persona]
# name = "沈屿"
# age = 24
# profile_path = "/path/to/profile.txt"   # omit to use the built-in profile
"##
    .to_string()
}
