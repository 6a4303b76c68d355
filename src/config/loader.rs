//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{NimbusConfig, API_KEY_ENV};
use crate::config::validation::{validate_config, ValidationError};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "nimbus.toml";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// `OPENWEATHERMAP_API_KEY` in the environment overrides `upstream.api_key`.
pub fn load_config(path: &Path) -> Result<NimbusConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: NimbusConfig = toml::from_str(&content)?;
    finish(config)
}

/// Load the configuration for process startup.
///
/// An explicit path must exist. Without one, `nimbus.toml` is used when
/// present and built-in defaults otherwise.
pub fn load_startup_config(path: Option<&Path>) -> Result<NimbusConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_config(default_path)
            } else {
                finish(NimbusConfig::default())
            }
        }
    }
}

fn finish(mut config: NimbusConfig) -> Result<NimbusConfig, ConfigError> {
    apply_api_key_override(&mut config, std::env::var(API_KEY_ENV).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace the configured API key with one taken from the environment.
///
/// Empty values are ignored so an exported-but-blank variable cannot erase
/// a key set in the file.
pub fn apply_api_key_override(config: &mut NimbusConfig, env_key: Option<String>) {
    if let Some(key) = env_key.filter(|k| !k.is_empty()) {
        config.upstream.api_key = Some(key);
    }
}
