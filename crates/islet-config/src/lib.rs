//! Islet configuration system.
//!
//! Provides TOML-based configuration for the server binary: upstream
//! provider settings, HTTP listener settings, and the persona section.
//! All config sections use sensible defaults so partial configs work
//! out of the box.

pub mod loader;
pub mod persona;
pub mod schema;

mod template;

pub use loader::{create_default_config, default_config_path, load_default, load_from_path};
pub use persona::Persona;
pub use schema::{IsletConfig, PersonaConfig, ProviderConfig, ServerConfig};

use islet_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a default
/// file if none exists.
pub fn load_config() -> Result<IsletConfig, ConfigError> {
    loader::load_default()
}
