//! Snapshot cache file management
//!
//! The snapshot lives in a single JSON file. It is rebuilt when missing,
//! invalid or older than the TTL, and is always replaced as a whole.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use fs2::FileExt;
use tempfile::NamedTempFile;

use super::snapshot::Snapshot;
use super::CacheStatus;
use crate::archive::Archive;
use crate::config::{ArchiveConfig, Config};
use crate::error::{Result, ShelfError};

/// Snapshot cache manager
pub struct SnapshotCache {
    cache_file: PathBuf,
    lock_file: PathBuf,
    ttl: Duration,
    archive: Archive,
    archive_config: ArchiveConfig,
}

impl SnapshotCache {
    /// Create a cache manager from configuration
    pub fn new(config: &Config) -> Self {
        let cache_file = config.cache_file();
        Self {
            lock_file: cache_file.with_extension("lock"),
            cache_file,
            ttl: Duration::from_secs(config.cache.ttl_secs),
            archive: Archive::new(&config.archive.root),
            archive_config: config.archive.clone(),
        }
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Current snapshot, rebuilding it if absent, invalid or expired
    pub fn get_snapshot(&self) -> Result<Snapshot> {
        if let Some(snapshot) = self.load_fresh()? {
            tracing::debug!(age_secs = snapshot.age_secs(), "Snapshot cache hit");
            return Ok(snapshot);
        }

        let _lock = self.lock()?;

        // Another process may have rebuilt while we waited for the lock
        if let Some(snapshot) = self.load_fresh()? {
            tracing::debug!("Snapshot rebuilt by another process");
            return Ok(snapshot);
        }

        self.write_new()
    }

    /// Rebuild the snapshot unconditionally
    pub fn rebuild(&self) -> Result<Snapshot> {
        let _lock = self.lock()?;
        self.write_new()
    }

    /// Read the stored snapshot regardless of its age.
    ///
    /// Returns `None` when there is no cache file or it does not hold a valid
    /// snapshot. An existing file that cannot be read is an error.
    pub fn load(&self) -> Result<Option<Snapshot>> {
        let data = match fs::read(&self.cache_file) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ShelfError::unreadable(&self.cache_file, e)),
        };

        let parsed = serde_json::from_slice::<Snapshot>(&data)
            .map_err(ShelfError::from)
            .and_then(Snapshot::validate);

        match parsed {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!("Discarding cache file {}: {}", self.cache_file.display(), e);
                Ok(None)
            }
        }
    }

    /// Whether a snapshot has reached the TTL
    pub fn is_expired(&self, snapshot: &Snapshot) -> bool {
        snapshot.age_secs() >= self.ttl.as_secs()
    }

    /// Remove the cache file.
    ///
    /// The lock file is left in place; it may be held by a running rebuild.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.cache_file) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Describe the cache file without rebuilding it
    pub fn status(&self) -> CacheStatus {
        let exists = self.cache_file.exists();
        let snapshot = self.load().unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            None
        });

        CacheStatus {
            path: self.cache_file.clone(),
            exists,
            ttl_secs: self.ttl.as_secs(),
            age_secs: snapshot.as_ref().map(Snapshot::age_secs),
            count: snapshot.as_ref().map(|s| s.count),
            created_at: snapshot.as_ref().map(|s| s.created_at),
            fresh: snapshot.as_ref().is_some_and(|s| !self.is_expired(s)),
        }
    }

    fn load_fresh(&self) -> Result<Option<Snapshot>> {
        Ok(self.load()?.filter(|s| !self.is_expired(s)))
    }

    /// Exclusive lock serializing rebuilds, released when the file is dropped
    fn lock(&self) -> Result<File> {
        let lock_err = |source: std::io::Error| ShelfError::CacheLock {
            path: self.lock_file.clone(),
            source,
        };

        if let Some(parent) = self.lock_file.parent() {
            fs::create_dir_all(parent).map_err(lock_err)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_file)
            .map_err(lock_err)?;
        file.lock_exclusive().map_err(lock_err)?;
        Ok(file)
    }

    fn write_new(&self) -> Result<Snapshot> {
        let snapshot = Snapshot::build(&self.archive, &self.archive_config)?;
        let json = serde_json::to_string_pretty(&snapshot)?;

        let dir = self
            .cache_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.cache_file).map_err(|e| e.error)?;

        tracing::info!(
            count = snapshot.count,
            path = %self.cache_file.display(),
            "Rebuilt snapshot cache"
        );
        Ok(snapshot)
    }
}
