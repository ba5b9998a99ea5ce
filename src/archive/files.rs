//! Browsing, viewing and downloading the files of a single item

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::metadata::{read_item_info, ItemInfo};
use super::scanner::Archive;
use crate::config::ArchiveConfig;
use crate::error::{Result, ShelfError};

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of an item directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Size in bytes, files only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Contents of one file within an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContents {
    /// Path relative to the item directory, `/`-separated
    pub path: String,
    pub size: u64,
    pub contents: String,
}

/// Full view of one item: metadata, a directory listing and optionally a file
#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub category: String,
    pub script: String,
    #[serde(flatten)]
    pub info: ItemInfo,
    /// Sub-directory being listed, relative to the item, `/`-separated
    pub subpath: String,
    pub entries: Vec<DirEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileContents>,
}

/// View an item, optionally descending into `subpath`.
///
/// A `subpath` naming a directory lists that directory. One naming a file
/// lists the file's parent directory and attaches the file's contents.
pub fn view_item(
    archive: &Archive,
    category: &str,
    script: &str,
    subpath: Option<&str>,
    config: &ArchiveConfig,
) -> Result<ItemView> {
    let item_dir = archive.item_dir(category, script)?;
    let info = read_item_info(&item_dir, config)?;

    let rel = match subpath {
        Some(p) => relative_path(p)?,
        None => PathBuf::new(),
    };
    let target = item_dir.join(&rel);

    let (listed, file) = if target.is_dir() {
        (rel, None)
    } else if target.is_file() {
        let parent = rel.parent().map(Path::to_path_buf).unwrap_or_default();
        (parent, Some(load_file(&target, &rel)?))
    } else {
        return Err(ShelfError::FileNotFound(display_rel(&rel)));
    };

    Ok(ItemView {
        category: category.to_string(),
        script: script.to_string(),
        info,
        subpath: display_rel(&listed),
        entries: list_entries(&item_dir.join(&listed))?,
        file,
    })
}

/// Read one file of an item
pub fn read_file(
    archive: &Archive,
    category: &str,
    script: &str,
    path: &str,
) -> Result<FileContents> {
    let (full, rel) = resolve_file(archive, category, script, path)?;
    load_file(&full, &rel)
}

/// Copy one file of an item into `dest_dir`, returning the written path
pub fn download(
    archive: &Archive,
    category: &str,
    script: &str,
    path: &str,
    dest_dir: &Path,
    overwrite: bool,
) -> Result<PathBuf> {
    let (full, _) = resolve_file(archive, category, script, path)?;
    let name = full
        .file_name()
        .ok_or_else(|| ShelfError::FileNotFound(path.to_string()))?;

    if !dest_dir.is_dir() {
        return Err(ShelfError::InvalidArgument(format!(
            "destination is not a directory: {}",
            dest_dir.display()
        )));
    }

    let dest = dest_dir.join(name);
    if dest.exists() && !overwrite {
        return Err(ShelfError::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            dest.display()
        )));
    }

    fs::copy(&full, &dest)?;
    tracing::debug!(from = %full.display(), to = %dest.display(), "Downloaded file");
    Ok(dest)
}

fn resolve_file(
    archive: &Archive,
    category: &str,
    script: &str,
    path: &str,
) -> Result<(PathBuf, PathBuf)> {
    let item_dir = archive.item_dir(category, script)?;
    let rel = relative_path(path)?;
    let full = item_dir.join(&rel);
    if !full.is_file() {
        return Err(ShelfError::FileNotFound(display_rel(&rel)));
    }
    Ok((full, rel))
}

fn load_file(full: &Path, rel: &Path) -> Result<FileContents> {
    let bytes = fs::read(full).map_err(|e| ShelfError::unreadable(full, e))?;
    Ok(FileContents {
        path: display_rel(rel),
        size: bytes.len() as u64,
        contents: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Files first, then directories, each sorted by name
fn list_entries(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        let (kind, size) = if metadata.is_dir() {
            (EntryKind::Directory, None)
        } else {
            (EntryKind::File, Some(metadata.len()))
        };
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
            size,
        });
    }
    entries.sort_by(|a, b| {
        (a.kind == EntryKind::Directory, &a.name).cmp(&(b.kind == EntryKind::Directory, &b.name))
    });
    Ok(entries)
}

/// Validate a path relative to an item directory.
///
/// Only plain names are allowed; `..`, `.` and absolute paths are rejected.
fn relative_path(path: &str) -> Result<PathBuf> {
    let mut rel = PathBuf::new();
    for component in Path::new(path.trim_end_matches('/')).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            _ => {
                return Err(ShelfError::InvalidArgument(format!(
                    "'{}' is not a valid path inside an item",
                    path
                )))
            }
        }
    }
    Ok(rel)
}

fn display_rel(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_item() -> (TempDir, Archive) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("code");
        let item = root.join("php").join("sample1");
        fs::create_dir_all(item.join("lib").join("deep")).unwrap();
        fs::write(
            item.join("README.txt"),
            "TITLE: Sample One\nKEYWORDS: demo, test\nDESCRIPTION: A demo.\n\n",
        )
        .unwrap();
        fs::write(item.join("index.php"), "<?php echo 'hi';").unwrap();
        fs::write(item.join("lib").join("util.php"), "<?php // util").unwrap();
        (temp_dir, Archive::new(root))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // view_item Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_view_item_root() {
        let (_tmp, archive) = make_item();
        let view = view_item(&archive, "php", "sample1", None, &ArchiveConfig::default()).unwrap();

        assert_eq!(view.info.title, "Sample One");
        assert_eq!(view.subpath, "");
        let names: Vec<_> = view.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["README.txt", "index.php", "lib"]);
        assert_eq!(view.entries[2].kind, EntryKind::Directory);
        assert!(view.file.is_none());
    }

    #[test]
    fn test_view_item_subdirectory() {
        let (_tmp, archive) = make_item();
        let view = view_item(
            &archive,
            "php",
            "sample1",
            Some("lib/"),
            &ArchiveConfig::default(),
        )
        .unwrap();

        assert_eq!(view.subpath, "lib");
        let names: Vec<_> = view.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["util.php", "deep"]);
    }

    #[test]
    fn test_view_item_with_file() {
        let (_tmp, archive) = make_item();
        let view = view_item(
            &archive,
            "php",
            "sample1",
            Some("lib/util.php"),
            &ArchiveConfig::default(),
        )
        .unwrap();

        assert_eq!(view.subpath, "lib");
        let file = view.file.unwrap();
        assert_eq!(file.path, "lib/util.php");
        assert_eq!(file.contents, "<?php // util");
    }

    #[test]
    fn test_view_item_missing_path() {
        let (_tmp, archive) = make_item();
        let err = view_item(
            &archive,
            "php",
            "sample1",
            Some("nope.php"),
            &ArchiveConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ShelfError::FileNotFound(ref p) if p == "nope.php"));
    }

    #[test]
    fn test_view_item_missing_item() {
        let (_tmp, archive) = make_item();
        let err = view_item(&archive, "php", "ghost", None, &ArchiveConfig::default()).unwrap_err();
        assert!(matches!(err, ShelfError::ItemNotFound { .. }));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // read_file Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_read_file() {
        let (_tmp, archive) = make_item();
        let file = read_file(&archive, "php", "sample1", "index.php").unwrap();
        assert_eq!(file.contents, "<?php echo 'hi';");
        assert_eq!(file.size, 16);
    }

    #[test]
    fn test_read_file_rejects_escape() {
        let (_tmp, archive) = make_item();
        let err = read_file(&archive, "php", "sample1", "../../secret").unwrap_err();
        assert!(matches!(err, ShelfError::InvalidArgument(_)));
    }

    #[test]
    fn test_read_file_directory_is_not_a_file() {
        let (_tmp, archive) = make_item();
        let err = read_file(&archive, "php", "sample1", "lib").unwrap_err();
        assert!(matches!(err, ShelfError::FileNotFound(_)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // download Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_download_copies_file() {
        let (tmp, archive) = make_item();
        let dest = tmp.path().join("out");
        fs::create_dir_all(&dest).unwrap();

        let written = download(&archive, "php", "sample1", "lib/util.php", &dest, false).unwrap();
        assert_eq!(written, dest.join("util.php"));
        assert_eq!(fs::read_to_string(&written).unwrap(), "<?php // util");
    }

    #[test]
    fn test_download_refuses_overwrite() {
        let (tmp, archive) = make_item();
        let dest = tmp.path().join("out");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("index.php"), "old").unwrap();

        assert!(download(&archive, "php", "sample1", "index.php", &dest, false).is_err());
        download(&archive, "php", "sample1", "index.php", &dest, true).unwrap();
        assert_eq!(
            fs::read_to_string(dest.join("index.php")).unwrap(),
            "<?php echo 'hi';"
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("a/b/").unwrap(), PathBuf::from("a/b"));
        assert_eq!(relative_path("").unwrap(), PathBuf::new());
        assert!(relative_path("/etc/passwd").is_err());
        assert!(relative_path("a/../b").is_err());
    }
}
