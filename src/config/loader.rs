//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{BaseUrl, RouterConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `base_url`, as set by the deployment.
pub const BASE_URL_ENV: &str = "BASE_URL";

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
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RouterConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration: file (if any), then `BASE_URL`.
pub fn resolve_config(path: Option<&Path>) -> Result<RouterConfig, ConfigError> {
    let mut config = match path {
        Some(p) => load_config(p)?,
        None => RouterConfig::default(),
    };

    if let Ok(base) = std::env::var(BASE_URL_ENV) {
        tracing::debug!(base_url = %base, "Base URL overridden from environment");
        config.base_url = BaseUrl(base);
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_file() {
        let path = std::env::temp_dir().join("trainer_router_loader_ok.toml");
        fs::write(&path, "base_url = \"/app/\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_url.as_str(), "/app/");

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_rejects_invalid_base() {
        let path = std::env::temp_dir().join("trainer_router_loader_bad.toml");
        fs::write(&path, "base_url = \"https://cdn.example.com/app\"\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/trainer-router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
