//! Configuration management for the FAL scraper.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings. Credentials are never stored
//! here; only the name of the environment variable that holds them.

use crate::metrics::CatalogSnapshot;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory settings
    pub data: DataConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// MAL API settings
    pub mal_api: MalApiConfig,

    /// Catalog snapshot used for manga percentiles
    #[serde(default)]
    pub catalog: CatalogSnapshot,

    /// Weekly ranking CSV settings
    #[serde(default)]
    pub weekly: WeeklyConfig,
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Root data directory path
    pub root_dir: String,

    /// Workbook output directory (relative to data directory or absolute)
    pub output_dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to data directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// MAL API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MalApiConfig {
    /// MAL v2 API base URL
    pub base_url: String,

    /// Environment variable holding the MAL client id
    pub client_id_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size for the seasonal listing (MAL caps this at 500)
    pub season_limit: u32,
}

/// Weekly ranking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyConfig {
    /// Directory holding `week-{n}.csv` exports
    pub input_dir: String,

    /// Directory receiving re-keyed `week-{n}.csv` files
    pub output_dir: String,
}

impl Default for WeeklyConfig {
    fn default() -> Self {
        Self {
            input_dir: "input".to_string(),
            output_dir: "output".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                root_dir: "data".to_string(),
                output_dir: "reports".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
            mal_api: MalApiConfig {
                base_url: "https://api.myanimelist.net/v2".to_string(),
                client_id_env: "CLIENT_ID".to_string(),
                timeout_secs: 30,
                season_limit: 500,
            },
            catalog: CatalogSnapshot::default(),
            weekly: WeeklyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Read the MAL client id from the environment.
    ///
    /// Call `dotenvy::dotenv()` first if the id lives in a `.env` file.
    pub fn client_id(&self) -> Result<String> {
        let var = &self.mal_api.client_id_env;
        let id = std::env::var(var)
            .with_context(|| format!("MAL client id not set: export {} or add it to .env", var))?;
        if id.trim().is_empty() {
            anyhow::bail!("MAL client id in {} is empty", var);
        }
        Ok(id)
    }

    /// Get the absolute path for the data directory
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.root_dir)
    }

    /// Get the absolute path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        self.resolve(&self.logging.log_dir)
    }

    /// Get the absolute path for the workbook output directory
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.data.output_dir)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir().join(path)
        }
    }
}
