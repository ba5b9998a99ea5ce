//! Item description file parsing
//!
//! Each item directory may carry a small description file laid out by line:
//!
//! ```text
//! TITLE: Sample One
//! KEYWORDS: demo, test
//! DESCRIPTION: First line of the description.
//! More description, <strong>markup</strong> allowed.
//!
//! Anything after the first blank line is ignored.
//! ```
//!
//! Lines that do not match fall back to defaults for that field.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ArchiveConfig;
use crate::error::{Result, ShelfError};

/// Metadata read from an item's description file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub title: String,
    pub keywords: Vec<String>,
    pub description: String,
}

impl ItemInfo {
    /// Defaults for an item without a usable description file
    pub fn defaults(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            keywords: Vec::new(),
            description: String::new(),
        }
    }
}

/// Title used when the description file has none: the directory name with
/// its first character upper-cased.
pub fn default_title(dir: &Path) -> String {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Untitled".to_string(),
    }
}

/// Read the metadata for one item directory.
///
/// A missing description file is created from a placeholder template when
/// `create_missing_readme` is set; the defaults are returned either way.
pub fn read_item_info(dir: &Path, config: &ArchiveConfig) -> Result<ItemInfo> {
    let title = default_title(dir);
    let file = dir.join(&config.readme);

    if !file.exists() {
        if config.create_missing_readme {
            write_placeholder(&file, &title);
        }
        return Ok(ItemInfo::defaults(title));
    }

    let bytes = fs::read(&file).map_err(|e| ShelfError::unreadable(&file, e))?;
    Ok(parse_info(&String::from_utf8_lossy(&bytes), &title))
}

/// Parse description file contents positionally.
pub fn parse_info(contents: &str, default_title: &str) -> ItemInfo {
    let lines: Vec<&str> = contents.lines().collect();
    let line = |i: usize| lines.get(i).copied().unwrap_or_default();

    let title = field(line(0), "TITLE:")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(default_title)
        .to_string();

    let keywords = field(line(1), "KEYWORDS:")
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    let description = match field(line(2), "DESCRIPTION:") {
        Some(first) => {
            let mut parts = vec![first];
            parts.extend(
                lines
                    .iter()
                    .skip(3)
                    .take_while(|l| !l.trim().is_empty())
                    .copied(),
            );
            parts.join("\n").trim().to_string()
        }
        None => String::new(),
    };

    ItemInfo {
        title,
        keywords,
        description,
    }
}

/// Value after `<LABEL>: `, if the line carries that label.
fn field<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)?
        .strip_prefix(|c: char| c.is_whitespace())
}

/// Placeholder written for items without a description file.
///
/// Parsing it back yields the same defaults as a missing file.
fn placeholder(title: &str) -> String {
    format!(
        "TITLE: {title}\n\
         KEYWORDS: \n\
         DESCRIPTION: \n\
         \n\
         Instructions\n\
         \n\
         The first three lines above MUST keep their labels in capitals followed by a space.\n\
         TITLE and KEYWORDS stay on one line; separate keywords with commas.\n\
         The DESCRIPTION may span several lines (markup is allowed) and ends at the first blank line.\n"
    )
}

fn write_placeholder(file: &Path, title: &str) {
    let result = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(file)
        .and_then(|mut f| f.write_all(placeholder(title).as_bytes()));

    match result {
        Ok(()) => tracing::debug!(path = %file.display(), "Created placeholder description"),
        Err(e) => tracing::warn!("Could not create {}: {}", file.display(), e),
    }
}
