//! Flat metadata index of the whole archive

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::archive::{read_item_info, Archive};
use crate::config::ArchiveConfig;
use crate::error::{Result, ShelfError};

/// Metadata of one item, identified by `(category, script)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub category: String,
    pub script: String,
    pub title: String,
    pub keywords: Vec<String>,
    pub description: String,
}

/// Every item record at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub records: Vec<ItemRecord>,
    pub count: usize,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    /// Wrap records into a snapshot stamped with the current time
    pub fn new(records: Vec<ItemRecord>) -> Self {
        Self {
            count: records.len(),
            records,
            created_at: Utc::now(),
        }
    }

    /// Scan every category and read the metadata of each item
    pub fn build(archive: &Archive, config: &ArchiveConfig) -> Result<Self> {
        let mut records = Vec::new();
        for (category, items) in archive.all_items()? {
            for script in items {
                let info = read_item_info(&archive.root().join(&category).join(&script), config)?;
                records.push(ItemRecord {
                    category: category.clone(),
                    script,
                    title: info.title,
                    keywords: info.keywords,
                    description: info.description,
                });
            }
        }
        Ok(Self::new(records))
    }

    /// Check the invariants of a snapshot read back from disk
    pub fn validate(self) -> Result<Self> {
        if self.count != self.records.len() {
            return Err(ShelfError::InvalidSnapshot(format!(
                "count {} does not match {} records",
                self.count,
                self.records.len()
            )));
        }

        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert((record.category.as_str(), record.script.as_str())) {
                return Err(ShelfError::InvalidSnapshot(format!(
                    "duplicate record {}/{}",
                    record.category, record.script
                )));
            }
        }

        Ok(self)
    }

    /// Seconds elapsed since the snapshot was created
    pub fn age_secs(&self) -> u64 {
        let age = Utc::now().signed_duration_since(self.created_at);
        age.num_seconds().max(0) as u64
    }
}
