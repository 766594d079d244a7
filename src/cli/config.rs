//! Configuration management for ResumeDrop
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.resumedrop/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::errors::{ClientError, Result};

/// Complete configuration for ResumeDrop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Backend server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

/// Terminal display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub show_progress: bool,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub state_dir: String,
    pub download_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            http: HttpConfig::default(),
            display: DisplayConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            show_progress: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.resumedrop".to_string(),
            download_dir: "~/.resumedrop/downloads".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ClientError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ClientError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(home) = dirs::home_dir() {
            let config_path = home.join(".resumedrop").join("config.toml");
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(ClientError::ConfigError(
                "server host must not be empty".to_string()
            ));
        }

        if self.server.port == 0 {
            return Err(ClientError::ConfigError(
                "server port must be greater than 0".to_string()
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(ClientError::ConfigError(
                "timeout_secs must be greater than 0".to_string()
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ClientError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ClientError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Get backend base URL
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if path.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(&path[2..]);
            }
        }
        PathBuf::from(path)
    }

    /// Get state directory path
    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.state_dir)
    }

    /// Get download directory path
    pub fn download_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.download_dir)
    }

    /// Get command history file path
    pub fn history_file(&self) -> PathBuf {
        self.state_dir().join("history")
    }
}
