//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `TALLY_*` environment variable overrides.

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::pipeline::types::WeekStart;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Aggregation pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// IANA timezone every uploaded timestamp is resolved in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// First day of the week for week bucketing
    #[serde(default)]
    pub week_start: WeekStart,
}

fn default_timezone() -> String {
    "Asia/Singapore".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            week_start: WeekStart::default(),
        }
    }
}

impl PipelineConfig {
    /// Resolve the configured timezone name to a `chrono_tz::Tz`
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse().map_err(|_| ConfigError::Timezone {
            value: self.timezone.clone(),
        })
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted upload size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024 // 25 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` for development, `json` for production
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
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
            dirs::config_dir().map(|p| p.join("tally").join("config.toml")),
            Some(PathBuf::from("/etc/tally/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Pipeline overrides
        if let Ok(timezone) = std::env::var("TALLY_TIMEZONE") {
            self.pipeline.timezone = timezone;
        }
        if let Ok(week_start) = std::env::var("TALLY_WEEK_START") {
            match week_start.to_lowercase().as_str() {
                "monday" => self.pipeline.week_start = WeekStart::Monday,
                "sunday" => self.pipeline.week_start = WeekStart::Sunday,
                other => tracing::warn!("Ignoring unknown TALLY_WEEK_START value: {}", other),
            }
        }

        // API overrides
        if let Ok(host) = std::env::var("TALLY_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("TALLY_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }
        if let Ok(max) = std::env::var("TALLY_MAX_UPLOAD_BYTES") {
            if let Ok(m) = max.parse() {
                self.api.max_upload_bytes = m;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("TALLY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TALLY_LOG_FORMAT") {
            self.logging.format = format;
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

    #[error("Unknown timezone: {value}")]
    Timezone { value: String },
}
