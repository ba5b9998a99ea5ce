//! Configuration loading and on-disk locations

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ArchiveConfig, CacheConfig, Config, OutputConfig, CONFIG_KEYS, DEFAULT_TTL_SECS};
