pub mod json;
pub mod pretty;

use crate::archive::{FileContents, ItemListing, ItemView};
use crate::cache::CacheStatus;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::search::SearchResults;

/// Format the category list based on output format
pub fn format_categories(categories: &[String], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_categories(categories)),
        OutputFormat::Json => json::format_json(categories),
    }
}

/// Format an item listing based on output format
pub fn format_listing(listing: &ItemListing, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_listing(listing)),
        OutputFormat::Json => json::format_json(listing),
    }
}

/// Format a single item view based on output format
pub fn format_item_view(view: &ItemView, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_item_view(view)),
        OutputFormat::Json => json::format_json(view),
    }
}

/// Format file contents based on output format.
///
/// Pretty output prints the raw contents so they can be piped.
pub fn format_file(file: &FileContents, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(file.contents.trim_end_matches('\n').to_string()),
        OutputFormat::Json => json::format_json(file),
    }
}

/// Format search results based on output format
pub fn format_search(phrase: &str, results: &SearchResults, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_search(phrase, results)),
        OutputFormat::Json => json::format_json(results),
    }
}

/// Format the cache status based on output format
pub fn format_cache_status(status: &CacheStatus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cache_status(status)),
        OutputFormat::Json => json::format_json(status),
    }
}
