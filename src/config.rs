use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "AUDIO_DEVICES_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// How read commands print their results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Print JSON even without `--json`
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when no `-v` flag is given
    pub level: Option<String>,
}

/// Locates and loads the configuration file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Resolve the config path: explicit path, then `AUDIO_DEVICES_CONFIG`, then
    /// `<config dir>/audio-devices/config.toml`
    pub fn new(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => PathBuf::from(path),
                None => dirs::config_dir()
                    .context("Failed to get config directory")?
                    .join("audio-devices")
                    .join("config.toml"),
            },
        };
        Ok(Self { config_path })
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!("Config file {} not found, using defaults", self.config_path.display());
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config {}", self.config_path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", self.config_path.display()))?;
        debug!("Config loaded from {}", self.config_path.display());
        Ok(config)
    }
}
