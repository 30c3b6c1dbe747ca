//! Configuration management for Repolish
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REPOLISH_*)
//! 3. Config file (~/.config/repolish/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;
use crate::{Error, Result};

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Base URL of the OpenAI-compatible API
    pub api_base: String,

    /// Model used for review rewriting
    pub model: String,

    /// Connect/read timeout for a single completion request
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the web server binds to
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Completion provider settings
    pub provider: ProviderConfig,

    /// Retry policy for outbound completion calls
    pub retry: RetryPolicy,

    /// Web server settings
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/repolish/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("repolish").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REPOLISH_API_BASE: Base URL of the completion API
    /// - REPOLISH_MODEL: Model to use
    /// - REPOLISH_BIND: Server bind address
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(api_base) = std::env::var("REPOLISH_API_BASE") {
            self.provider.api_base = api_base;
        }

        if let Ok(model) = std::env::var("REPOLISH_MODEL") {
            self.provider.model = model;
        }

        if let Ok(bind) = std::env::var("REPOLISH_BIND") {
            self.server.bind = bind;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(
        mut self,
        api_base: Option<String>,
        model: Option<String>,
        bind: Option<String>,
    ) -> Self {
        if let Some(base) = api_base {
            self.provider.api_base = base;
        }

        if let Some(m) = model {
            self.provider.model = m;
        }

        if let Some(b) = bind {
            self.server.bind = b;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(
        config_path: Option<PathBuf>,
        api_base: Option<String>,
        model: Option<String>,
        bind: Option<String>,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::load()?,
        };

        Ok(config
            .with_env_overrides()
            .with_cli_overrides(api_base, model, bind))
    }
}
