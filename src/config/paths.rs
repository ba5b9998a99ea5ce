use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Manages paths for codeshelf configuration
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.codeshelf)
    pub root: PathBuf,
    /// Configuration file path (~/.codeshelf/config.toml)
    pub config_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::in_dir(PathBuf::from(home).join(".codeshelf")))
    }

    /// Create a Paths instance rooted at an explicit directory
    pub fn in_dir(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join("config.toml"),
            root,
        }
    }

    /// Ensure the configuration directory exists
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}
