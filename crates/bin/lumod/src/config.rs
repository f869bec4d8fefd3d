//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `lumo.toml` in the working directory (or the path given on
//! the command line). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use lumo_adapter_dali_usb::DeviceConfig;
use lumo_adapter_parser_openai::ModelConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Persisted lamp record settings.
    pub state: StateConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Model-based parser settings.
    pub model: ModelConfig,
    /// USB DALI gateway settings.
    pub device: DeviceConfig,
}

/// Where the lamp record lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Path of the JSON state file.
    pub path: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the given path (default `lumo.toml`, if
    /// present) then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path.unwrap_or(Path::new("lumo.toml")))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LUMO_STATE_PATH") {
            self.state.path = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("LUMO_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        self.model.apply_env_overrides();
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "model timeout must be non-zero".to_string(),
            ));
        }
        if self.state.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "state path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("lumo-state.json"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
