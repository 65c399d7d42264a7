//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load and validate configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = serde_json::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Semantic checks serde cannot express. Collects all errors, not just the
/// first, so a broken config is fixable in one pass.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, route) in config.routes.iter().enumerate() {
        if route.path.is_empty() {
            errors.push(format!("route[{i}]: path must not be empty"));
        }
        if !(route.target.starts_with("http://") || route.target.starts_with("https://")) {
            errors.push(format!(
                "route[{i}] ({}): target must start with http:// or https://",
                route.path
            ));
        }
    }

    if config.forwarding.timeout_ms == 0 {
        errors.push("forwarding.timeout-ms must be greater than zero".to_string());
    }
    for method in &config.forwarding.body_methods {
        if method.parse::<axum::http::Method>().is_err() {
            errors.push(format!("forwarding.body-methods: invalid method {method:?}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
