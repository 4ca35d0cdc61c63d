//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the router host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// URL prefix the application is served under (e.g. "/" or "/trainer/").
    pub base_url: BaseUrl,

    /// Directory holding view chunks for lazily loaded pages.
    /// When unset, lazy pages are produced by in-process loaders.
    pub assets_dir: Option<PathBuf>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Base path wrapper so the default is "/" rather than an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BaseUrl(pub String);

impl Default for BaseUrl {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl BaseUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url.as_str(), "/");
        assert!(config.assets_dir.is_none());
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_full_config() {
        let config: RouterConfig = toml::from_str(
            r#"
            base_url = "/trainer/"
            assets_dir = "dist/views"

            [observability]
            log_level = "debug"
            json_logs = true
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_str(), "/trainer/");
        assert_eq!(config.assets_dir, Some(PathBuf::from("dist/views")));
        assert!(config.observability.json_logs);
    }
}
