//! Snapshot cache of archive metadata
//!
//! Holds a flat index of every item so searches do not rescan the archive.

mod snapshot;
mod store;

pub use snapshot::{ItemRecord, Snapshot};
pub use store::SnapshotCache;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status of the snapshot cache file
#[derive(Debug, Serialize)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub ttl_secs: u64,
    pub age_secs: Option<u64>,
    pub count: Option<usize>,
    pub created_at: Option<DateTime<Utc>>,
    /// Whether the snapshot would be served without a rebuild
    pub fresh: bool,
}
