//! Category and item directory scanning

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::metadata::{read_item_info, ItemInfo};
use crate::config::ArchiveConfig;
use crate::error::{Result, ShelfError};

/// Result of scanning one category or the whole archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Listing {
    /// Item names of a single category
    Category(Vec<String>),
    /// Item names keyed by category
    All(BTreeMap<String, Vec<String>>),
}

/// Items enriched with their metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ItemListing {
    /// Items of a single category
    Category {
        category: String,
        items: BTreeMap<String, ItemInfo>,
    },
    /// Items of every category
    All(BTreeMap<String, BTreeMap<String, ItemInfo>>),
}

/// An on-disk archive laid out as `<root>/<category>/<item>/`
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All category names, sorted
    pub fn categories(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(ShelfError::ArchiveRootNotFound(self.root.clone()));
        }
        subdirectories(&self.root)
    }

    /// Directory of a category, if it exists
    pub fn category_dir(&self, category: &str) -> Result<PathBuf> {
        check_segment(category)?;
        let dir = self.root.join(category);
        if !dir.is_dir() {
            return Err(ShelfError::CategoryNotFound(category.to_string()));
        }
        Ok(dir)
    }

    /// Directory of an item, if it exists
    pub fn item_dir(&self, category: &str, item: &str) -> Result<PathBuf> {
        let dir = self.category_dir(category)?;
        check_segment(item)?;
        let dir = dir.join(item);
        if !dir.is_dir() {
            return Err(ShelfError::item_not_found(category, item));
        }
        Ok(dir)
    }

    /// Item names of one category, sorted
    pub fn items(&self, category: &str) -> Result<Vec<String>> {
        let dir = self.category_dir(category)?;
        subdirectories(&dir)
    }

    /// Item names of every category
    pub fn all_items(&self) -> Result<BTreeMap<String, Vec<String>>> {
        let mut all = BTreeMap::new();
        for category in self.categories()? {
            let items = subdirectories(&self.root.join(&category))?;
            all.insert(category, items);
        }
        Ok(all)
    }

    /// Scan a single category, or every category when none is given
    pub fn scan(&self, category: Option<&str>) -> Result<Listing> {
        tracing::debug!(root = %self.root.display(), category = ?category, "Scanning archive");
        match category {
            Some(category) => Ok(Listing::Category(self.items(category)?)),
            None => Ok(Listing::All(self.all_items()?)),
        }
    }

    /// Scan and read each item's metadata
    pub fn current_items(
        &self,
        category: Option<&str>,
        config: &ArchiveConfig,
    ) -> Result<ItemListing> {
        match self.scan(category)? {
            Listing::Category(items) => {
                let category = category.unwrap_or_default().to_string();
                let items = self.read_infos(&category, items, config)?;
                Ok(ItemListing::Category { category, items })
            }
            Listing::All(all) => {
                let mut listing = BTreeMap::new();
                for (category, items) in all {
                    let infos = self.read_infos(&category, items, config)?;
                    listing.insert(category, infos);
                }
                Ok(ItemListing::All(listing))
            }
        }
    }

    fn read_infos(
        &self,
        category: &str,
        items: Vec<String>,
        config: &ArchiveConfig,
    ) -> Result<BTreeMap<String, ItemInfo>> {
        items
            .into_iter()
            .map(|item| -> Result<(String, ItemInfo)> {
                let info = read_item_info(&self.root.join(category).join(&item), config)?;
                Ok((item, info))
            })
            .collect()
    }
}

/// Reject anything but a single plain path component
pub(crate) fn check_segment(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(ShelfError::InvalidArgument(format!(
            "'{}' is not a valid name",
            name
        ))),
    }
}

/// Names of the sub-directories of `dir`, sorted
fn subdirectories(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
