//! Configuration management
//!
//! This module handles loading the sitedeploy configuration file.
//! The configuration file is stored in TOML format at
//! `~/.config/sitedeploy/config.toml`, or under `$SITEDEPLOY_CONFIG_DIR` when set.
//!
//! PROTECTED FILE: Changes to schema_version require migration support.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::session::SessionOptions;

/// Current configuration schema version
///
/// IMPORTANT: Bumping this version requires a migration in `ConfigManager::migrate`.
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable that overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "SITEDEPLOY_CONFIG_DIR";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Defaults applied when the matching CLI flag is absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defaults {
    /// Named AWS credential profile
    #[serde(default)]
    pub profile: Option<String>,

    /// AWS region for new buckets
    #[serde(default)]
    pub region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

impl Config {
    /// Merge CLI overrides with the file defaults
    ///
    /// A flag given on the command line always wins over the file.
    pub fn session_options(&self, profile: Option<String>, region: Option<String>) -> SessionOptions {
        SessionOptions {
            profile: profile.or_else(|| self.defaults.profile.clone()),
            region: region.or_else(|| self.defaults.region.clone()),
        }
    }
}

/// Configuration manager handles loading and saving config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("sitedeploy"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path
    #[cfg(test)]
    pub(crate) fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version < SCHEMA_VERSION {
            config = self.migrate(config)?;
        } else if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade sitedeploy.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(config)
    }

    fn migrate(&self, mut config: Config) -> Result<Config> {
        // Version 0 files predate the schema field and share the v1 layout.
        config.schema_version = SCHEMA_VERSION;
        Ok(config)
    }
}
