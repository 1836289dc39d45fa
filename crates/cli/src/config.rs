//! Configuration file handling
//!
//! Settings come from (lowest to highest precedence): built-in defaults,
//! `rline.toml` in the working directory or the file given with `--config`,
//! and command-line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "rline.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Store name; the database lives at `<dir>/<name>.db`
    pub name: String,
    /// Directory holding the store
    pub dir: PathBuf,
    /// Lines between checkpoints written during a scan (0 disables)
    pub indexing_interval: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Debug-level logs plus a dump of the store after each lookup
    pub debug: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: store::DEFAULT_STORE_NAME.to_string(),
            dir: PathBuf::from("."),
            indexing_interval: reader::DEFAULT_INDEXING_INTERVAL,
        }
    }
}

impl Config {
    /// Load from `explicit` if given, else from `rline.toml` if it exists,
    /// else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        let name = &self.cache.name;
        if name.is_empty() {
            anyhow::bail!("cache.name must not be empty");
        }
        if name.contains('/') || name.contains('\\') {
            anyhow::bail!("cache.name must not contain a path separator: '{}'", name);
        }
        Ok(())
    }

    /// Overlay values given on the command line
    pub fn apply_overrides(
        &mut self,
        name: Option<String>,
        dir: Option<PathBuf>,
        indexing_interval: Option<u64>,
    ) -> Result<()> {
        if let Some(name) = name {
            self.cache.name = name;
        }
        if let Some(dir) = dir {
            self.cache.dir = dir;
        }
        if let Some(interval) = indexing_interval {
            self.cache.indexing_interval = interval;
        }
        self.validate()
    }
}

/// Default configuration rendered as TOML
pub fn example_config() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("Failed to render default config")
}
