//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ServiceConfig, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the fetch timeout in seconds.
pub const HTTP_TIMEOUT_ENV: &str = "HTTP_TIMEOUT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
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

/// Load configuration: defaults, then the optional TOML file, then the process environment.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let config = match path {
        Some(path) => read_config_file(path)?,
        None => ServiceConfig::default(),
    };
    resolve_config(config)
}

/// Parse a TOML file without applying the environment or validating.
pub fn read_config_file(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply the process environment to a parsed configuration and validate it.
pub fn resolve_config(mut config: ServiceConfig) -> Result<ServiceConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto a configuration.
///
/// `lookup` is the environment source, `std::env::var` in production.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(HTTP_TIMEOUT_ENV) {
        config.fetch.timeout_secs = parse_timeout_secs(&raw);
    }
}

/// Parse a timeout in whole seconds, falling back to the default when the
/// value is not a positive integer.
pub fn parse_timeout_secs(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => secs,
        _ => {
            tracing::warn!(
                value = %raw,
                default_secs = DEFAULT_FETCH_TIMEOUT_SECS,
                "Invalid {}, using default fetch timeout",
                HTTP_TIMEOUT_ENV
            );
            DEFAULT_FETCH_TIMEOUT_SECS
        }
    }
}
