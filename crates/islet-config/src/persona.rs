//! Persona profile loading.
//!
//! The persona is an immutable value built once at process start and passed
//! explicitly to whoever needs it; nothing re-reads the profile after boot.

use islet_common::ConfigError;
use tracing::info;

use crate::schema::PersonaConfig;

/// Character profile shipped with the crate, used when the config does not
/// point at a profile file.
const BUILT_IN_PROFILE: &str = include_str!("profile/shenyu.txt");

/// An immutable persona: who the assistant is.
#[derive(Debug, Clone)]
pub struct Persona {
    pub name: String,
    pub age: u32,
    /// The character profile blob, embedded verbatim into the system prompt.
    pub profile: String,
}

impl Persona {
    /// Build the persona from config, reading the profile file if one is
    /// configured.
    pub fn load(config: &PersonaConfig) -> Result<Self, ConfigError> {
        let profile = match &config.profile_path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|_| {
                    ConfigError::FileNotFound(path.clone())
                })?;
                info!("loaded persona profile from {}", path.display());
                text
            }
            None => BUILT_IN_PROFILE.to_string(),
        };

        if profile.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "persona profile is empty".into(),
            ));
        }

        Ok(Self {
            name: config.name.clone(),
            age: config.age,
            profile,
        })
    }
}
