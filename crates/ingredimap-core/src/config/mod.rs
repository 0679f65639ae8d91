//! Configuration management for IngrediMap.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `ingredimap.toml` file
//! 3. User config `~/.config/ingredimap/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persistence configuration.
    pub storage: StorageConfig,

    /// Overlap graph configuration.
    pub graph: GraphConfig,

    /// Export configuration.
    pub export: ExportConfig,

    /// Visualization server configuration.
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./ingredimap.toml` (project local)
    /// 2. `~/.config/ingredimap/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(LOCAL_CONFIG_FILE).exists() {
            return Self::from_file(LOCAL_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("INGREDIMAP_DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Ok(path) = std::env::var("INGREDIMAP_SEED_FILE") {
            self.storage.seed_file = Some(path);
        }
        if let Ok(threshold) = std::env::var("INGREDIMAP_THRESHOLD") {
            if let Ok(n) = threshold.parse() {
                self.graph.threshold = n;
            }
        }
        if let Ok(port) = std::env::var("INGREDIMAP_PORT") {
            if let Ok(n) = port.parse() {
                self.server.port = n;
            }
        }
    }

    /// Checks values that would make the graph meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.threshold == 0 {
            return Err(ConfigError::Invalid(
                "graph.threshold must be at least 1".to_string(),
            ));
        }
        if self.graph.palette.is_empty() {
            return Err(ConfigError::Invalid(
                "graph.palette must contain at least one color".to_string(),
            ));
        }
        if self.storage.recipes_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.recipes_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding persisted data (default: ".ingredimap").
    pub data_dir: String,

    /// Key the recipe collection is stored under.
    pub recipes_key: String,

    /// Seed dataset used when nothing is persisted.
    /// If not set, uses the bundled dataset.
    pub seed_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            recipes_key: DEFAULT_RECIPES_KEY.to_string(),
            seed_file: None,
        }
    }
}

impl StorageConfig {
    /// Get the full path to the data directory.
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}

/// Overlap graph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum number of shared ingredients for an edge.
    pub threshold: usize,

    /// Colors assigned to cuisines in first-seen order.
    pub palette: Vec<String>,

    /// Color for recipes without a cuisine.
    pub fallback_color: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            palette: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
            fallback_color: DEFAULT_FALLBACK_COLOR.to_string(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix of the default export file name.
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

/// Visualization server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,

    /// Whether to open the browser automatically.
    pub open_browser: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            open_browser: true,
        }
    }
}
