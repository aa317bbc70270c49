//! Application configuration (YAML).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use td_extract::{ComponentOrder, DelegatedConfig, Strategy};

use crate::error::{AppError, AppResult};

/// Top-level configuration. Every field has a default, so an empty file
/// (or no file at all) selects the keyword strategy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub order: ComponentOrder,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Settings for the delegated strategy's HTTP text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub timeout_s: u64,
    pub max_attempts: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            api_key_env: "TD_API_KEY".to_string(),
            max_tokens: 1024,
            timeout_s: 30,
            max_attempts: 2,
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_s)
    }

    pub fn delegated_config(&self) -> DelegatedConfig {
        DelegatedConfig {
            timeout: self.timeout(),
            max_attempts: self.max_attempts,
        }
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> AppResult<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            AppError::Config(format!(
                "{} environment variable not set (required by the delegated strategy)",
                self.api_key_env
            ))
        })
    }

    fn check(&self) -> AppResult<()> {
        if self.timeout_s == 0 {
            return Err(AppError::Config(
                "service.timeout_s must be greater than zero".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(AppError::Config(
                "service.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse configuration from YAML text.
pub fn parse_config(content: &str) -> AppResult<AppConfig> {
    // An empty document deserializes as null rather than an empty map.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    config.service.check()?;
    Ok(config)
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}
