//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::client::{AuthContext, FileTokenStore, TokenStoreError};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend deployment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Development in debug builds, production in release builds
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://your-replit-domain.replit.app",
            Environment::Development => "http://localhost:3001",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "local" => Ok(Environment::Development),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment's default URL
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// URL the client should use
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.default_base_url())
    }
}

/// Token persistence configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Defaults to `<data_local_dir>/podium/token`
    pub token_file: Option<String>,
}

impl AuthConfig {
    pub fn token_path(&self) -> Result<PathBuf, TokenStoreError> {
        match &self.token_file {
            Some(path) => Ok(PathBuf::from(path)),
            None => FileTokenStore::default_path(),
        }
    }

    /// Auth context backed by the configured token file
    pub fn context(&self) -> Result<AuthContext, TokenStoreError> {
        AuthContext::persistent(FileTokenStore::new(self.token_path()?))
    }
}

/// Log output style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("podium").join("config.toml")),
            Some(PathBuf::from("./podium.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparseable values are skipped
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // API overrides
        if let Some(env) = lookup("PODIUM_ENV") {
            match env.parse() {
                Ok(env) => self.api.environment = env,
                Err(e) => tracing::warn!("Ignoring PODIUM_ENV: {}", e),
            }
        }
        if let Some(url) = lookup("PODIUM_API_URL") {
            self.api.base_url = Some(url);
        }

        // Auth overrides
        if let Some(path) = lookup("PODIUM_TOKEN_FILE") {
            self.auth.token_file = Some(path);
        }

        // Logging overrides
        if let Some(level) = lookup("PODIUM_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PODIUM_LOG_FORMAT") {
            match format.parse() {
                Ok(format) => self.logging.format = format,
                Err(e) => tracing::warn!("Ignoring PODIUM_LOG_FORMAT: {}", e),
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Podium Configuration
#
# Environment variables override these settings:
# - PODIUM_ENV
# - PODIUM_API_URL
# - PODIUM_TOKEN_FILE
# - PODIUM_LOG_LEVEL
# - PODIUM_LOG_FORMAT

[api]
# Backend deployment: production or development
# (defaults to development in debug builds, production in release builds)
# environment = "production"

# Explicit backend URL (overrides the environment default)
# base_url = "http://localhost:3001"

[auth]
# Where the bearer token is kept between runs
# token_file = "~/.local/share/podium/token"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
