use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for codeshelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Errors that can occur while browsing the archive
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Archive root directory is missing
    #[error("Archive root not found: {}", .0.display())]
    ArchiveRootNotFound(PathBuf),

    /// Category directory is missing
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Item directory is missing
    #[error("Item not found: {category}/{item}")]
    ItemNotFound { category: String, item: String },

    /// File inside an item is missing
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File exists but could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache file parsed but failed validation
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Could not acquire the cache rebuild lock
    #[error("Failed to lock cache at {}: {source}", path.display())]
    CacheLock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to write config file: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Environment variable error
    #[error("Environment error: {0}")]
    Env(#[from] std::env::VarError),
}

impl ShelfError {
    /// Create an unreadable-file error for the given path
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Create an item-not-found error
    pub fn item_not_found(category: impl Into<String>, item: impl Into<String>) -> Self {
        Self::ItemNotFound {
            category: category.into(),
            item: item.into(),
        }
    }

    /// Whether this error means a requested category, item or file is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ArchiveRootNotFound(_)
                | Self::CategoryNotFound(_)
                | Self::ItemNotFound { .. }
                | Self::FileNotFound(_)
        )
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            _ if self.is_not_found() => 3,
            Self::Unreadable { .. } => 4,
            Self::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}
