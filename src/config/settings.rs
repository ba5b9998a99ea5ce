use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::paths::Paths;
use crate::error::{Result, ShelfError};

/// Default cache TTL: 1 hour
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Archive location and description file handling
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Snapshot cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output preferences
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the archive lives and how item descriptions are read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchiveConfig {
    /// Directory holding one sub-directory per category
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Name of the per-item description file
    #[serde(default = "default_readme")]
    pub readme: String,
    /// Write a placeholder description file when an item has none
    #[serde(default = "default_true")]
    pub create_missing_readme: bool,
}

/// Snapshot cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    /// Directory the snapshot file is written to
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
    /// Snapshot validity window in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

/// Output formatting preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("code")
}

fn default_readme() -> String {
    "README.txt".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("cache")
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            readme: default_readme(),
            create_missing_readme: true,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Keys accepted by `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "archive.root",
    "archive.readme",
    "archive.create_missing_readme",
    "cache.dir",
    "cache.ttl_secs",
    "output.format",
];

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let paths = Paths::new()?;
        Self::load_from(&paths)
    }

    /// Load configuration from a specific paths instance
    pub fn load_from(paths: &Paths) -> Result<Self> {
        if !paths.config_exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&paths.config_file)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific paths instance
    pub fn save_to(&self, paths: &Paths) -> Result<()> {
        paths.ensure_dirs()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&paths.config_file, contents)?;
        Ok(())
    }

    /// Apply command-line overrides for the archive root and cache directory
    pub fn with_overrides(mut self, root: Option<&Path>, cache_dir: Option<&Path>) -> Self {
        if let Some(root) = root {
            self.archive.root = root.to_path_buf();
        }
        if let Some(dir) = cache_dir {
            self.cache.dir = dir.to_path_buf();
        }
        self
    }

    /// Path of the snapshot cache file
    pub fn cache_file(&self) -> PathBuf {
        self.cache.dir.join("snapshot.json")
    }

    /// Set a configuration value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "archive.root" => self.archive.root = PathBuf::from(value),
            "archive.readme" => {
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err(ShelfError::InvalidArgument(
                        "archive.readme must be a plain file name".to_string(),
                    ));
                }
                self.archive.readme = value.to_string();
            }
            "archive.create_missing_readme" => {
                self.archive.create_missing_readme = value.parse().map_err(|_| {
                    ShelfError::InvalidArgument(
                        "archive.create_missing_readme must be 'true' or 'false'".to_string(),
                    )
                })?;
            }
            "cache.dir" => self.cache.dir = PathBuf::from(value),
            "cache.ttl_secs" => {
                self.cache.ttl_secs = value.parse().map_err(|_| {
                    ShelfError::InvalidArgument(
                        "cache.ttl_secs must be a whole number of seconds".to_string(),
                    )
                })?;
            }
            "output.format" => {
                if value != "pretty" && value != "json" {
                    return Err(ShelfError::InvalidArgument(
                        "output.format must be 'pretty' or 'json'".to_string(),
                    ));
                }
                self.output.format = value.to_string();
            }
            _ => {
                return Err(ShelfError::InvalidArgument(format!(
                    "Unknown config key: {}. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}
