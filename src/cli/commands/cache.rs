//! Cache management commands

use colored::Colorize;

use crate::cache::SnapshotCache;
use crate::cli::args::{CacheArgs, CacheCommands, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// Handle cache commands
pub fn cache(config: &Config, args: &CacheArgs, format: OutputFormat) -> Result<String> {
    let cache = SnapshotCache::new(config);

    match &args.command {
        CacheCommands::Status => output::format_cache_status(&cache.status(), format),
        CacheCommands::Clear => clear(&cache, format),
        CacheCommands::Rebuild => rebuild(&cache, format),
    }
}

fn clear(cache: &SnapshotCache, format: OutputFormat) -> Result<String> {
    cache.clear()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Cache cleared", "✓".green())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "cleared"
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

fn rebuild(cache: &SnapshotCache, format: OutputFormat) -> Result<String> {
    let snapshot = cache.rebuild()?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Cache rebuilt with {} {}",
            "✓".green(),
            snapshot.count,
            if snapshot.count == 1 { "item" } else { "items" }
        )),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "status": "rebuilt",
                "count": snapshot.count,
                "created_at": snapshot.created_at,
                "path": cache.cache_file().display().to_string(),
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}
