//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("base_url must be an absolute path, got {0:?}")]
    BaseUrlNotAbsolute(String),

    #[error("base_url must not contain '#' or '?', got {0:?}")]
    BaseUrlHasFragment(String),

    #[error("unknown log level {0:?}")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let base = config.base_url.as_str();

    // An empty base is accepted and normalized to "/" by the history.
    if !base.is_empty() && !base.starts_with('/') {
        errors.push(ValidationError::BaseUrlNotAbsolute(base.to_string()));
    }
    if base.contains('#') || base.contains('?') {
        errors.push(ValidationError::BaseUrlHasFragment(base.to_string()));
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
