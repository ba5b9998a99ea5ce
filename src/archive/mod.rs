//! On-disk archive access
//!
//! The archive is a directory of categories, each holding one directory per
//! item. Items may carry a description file with their title, keywords and
//! description.

pub mod files;
pub mod metadata;
mod scanner;

pub use files::{download, read_file, view_item, DirEntry, EntryKind, FileContents, ItemView};
pub use metadata::{default_title, parse_info, read_item_info, ItemInfo};
pub use scanner::{Archive, ItemListing, Listing};
