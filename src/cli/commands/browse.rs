//! Archive browsing commands

use colored::Colorize;

use crate::archive::{self, Archive};
use crate::cli::args::{DownloadArgs, FileArgs, ListArgs, OutputFormat, ShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output;

/// Handle the categories command
pub fn categories(config: &Config, format: OutputFormat) -> Result<String> {
    let archive = Archive::new(&config.archive.root);
    output::format_categories(&archive.categories()?, format)
}

/// Handle the list command
pub fn list(config: &Config, args: &ListArgs, format: OutputFormat) -> Result<String> {
    let archive = Archive::new(&config.archive.root);
    let listing = archive.current_items(args.category.as_deref(), &config.archive)?;
    output::format_listing(&listing, format)
}

/// Handle the show command
pub fn show(config: &Config, args: &ShowArgs, format: OutputFormat) -> Result<String> {
    let archive = Archive::new(&config.archive.root);
    let view = archive::view_item(
        &archive,
        &args.category,
        &args.item,
        args.path.as_deref(),
        &config.archive,
    )?;
    output::format_item_view(&view, format)
}

/// Handle the cat command
pub fn cat(config: &Config, args: &FileArgs, format: OutputFormat) -> Result<String> {
    let archive = Archive::new(&config.archive.root);
    let file = archive::read_file(&archive, &args.category, &args.item, &args.path)?;
    output::format_file(&file, format)
}

/// Handle the download command
pub fn download(config: &Config, args: &DownloadArgs, format: OutputFormat) -> Result<String> {
    let archive = Archive::new(&config.archive.root);
    let written = archive::download(
        &archive,
        &args.file.category,
        &args.file.item,
        &args.file.path,
        &args.dest,
        args.force,
    )?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Saved {}", "✓".green(), written.display())),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "path": written.display().to_string(),
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}
