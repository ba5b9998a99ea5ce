use std::collections::BTreeMap;

use colored::Colorize;
use terminal_size::{terminal_size, Width};

use crate::archive::{EntryKind, FileContents, ItemInfo, ItemListing, ItemView};
use crate::cache::CacheStatus;
use crate::search::{result_count, SearchResults};

/// Fallback width when stdout is not a terminal
const DEFAULT_WIDTH: usize = 80;

/// Usable output width, capped so rules stay readable on wide terminals
fn output_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
        .clamp(40, 100)
}

fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > max_chars {
        let truncated: String = chars.iter().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Format a byte count for display
fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format age in human-readable form
pub fn format_age(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Format the list of categories
pub fn format_categories(categories: &[String]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Categories".bold()));
    output.push_str(&rule(40));
    output.push('\n');
    for category in categories {
        output.push_str(&format!("  {}\n", category.to_uppercase()));
    }
    output
}

/// One summary block: title, keywords, category and a description preview
fn push_summary(output: &mut String, category: &str, script: &str, info: &ItemInfo, width: usize) {
    output.push_str(&format!(
        "{} {}\n",
        info.title.bold(),
        format!("({}/{})", category, script).dimmed()
    ));
    if !info.keywords.is_empty() {
        output.push_str(&format!(
            "  {} {}\n",
            "Keywords:".cyan(),
            info.keywords.join(", ")
        ));
    }
    output.push_str(&format!("  {} {}\n", "Category:".cyan(), category.to_uppercase()));
    if let Some(first_line) = info.description.lines().next() {
        output.push_str(&format!("  {}\n", truncate_str(first_line, width.saturating_sub(2))));
    }
    output.push('\n');
}

fn push_category(
    output: &mut String,
    category: &str,
    items: &BTreeMap<String, ItemInfo>,
    width: usize,
) {
    for (script, info) in items {
        push_summary(output, category, script, info, width);
    }
}

/// Format an item listing for one category or the whole archive
pub fn format_listing(listing: &ItemListing) -> String {
    let width = output_width();
    let mut output = String::new();

    match listing {
        ItemListing::Category { category, items } => {
            output.push_str(&format!(
                "Viewing category: \"{}\"\n",
                category.bold()
            ));
            output.push_str(&rule(width));
            output.push('\n');
            if items.is_empty() {
                output.push_str("No items found.\n");
            }
            push_category(&mut output, category, items, width);
        }
        ItemListing::All(all) => {
            if all.values().all(BTreeMap::is_empty) {
                return "No items found.".to_string();
            }
            output.push_str(&format!("{}\n", "All items".bold()));
            output.push_str(&rule(width));
            output.push('\n');
            for (category, items) in all {
                push_category(&mut output, category, items, width);
            }
        }
    }

    output
}

/// Format a single item with its files and optional file contents
pub fn format_item_view(view: &ItemView) -> String {
    let width = output_width();
    let mut output = String::new();

    output.push_str(&format!("{}\n", view.info.title.bold()));
    output.push_str(&rule(width));
    output.push('\n');
    output.push_str(&format!("{} {}/{}\n", "Item:".cyan(), view.category, view.script));
    if !view.info.keywords.is_empty() {
        output.push_str(&format!("{} {}\n", "Keywords:".cyan(), view.info.keywords.join(", ")));
    }
    if !view.info.description.is_empty() {
        output.push_str(&format!("\n{}\n{}\n", "Description:".cyan(), view.info.description));
    }

    let location = if view.subpath.is_empty() {
        String::new()
    } else {
        format!(" >> {}", view.subpath.replace('/', " >> "))
    };
    output.push_str(&format!("\n{}{}\n", "Files:".cyan(), location.dimmed()));

    if view.entries.is_empty() {
        output.push_str(&format!("  {}\n", "(empty)".dimmed()));
    }
    for entry in &view.entries {
        match entry.kind {
            EntryKind::File => output.push_str(&format!(
                "  {:<40} {}\n",
                entry.name,
                format_size(entry.size.unwrap_or(0)).dimmed()
            )),
            EntryKind::Directory => {
                output.push_str(&format!("  {}\n", format!("/{}/", entry.name).blue().bold()))
            }
        }
    }

    if let Some(ref file) = view.file {
        output.push('\n');
        output.push_str(&format_file(file));
    }

    output
}

/// Format the contents of one file under a header
pub fn format_file(file: &FileContents) -> String {
    let width = output_width();
    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n",
        file.path.bold(),
        format!("({})", format_size(file.size)).dimmed()
    ));
    output.push_str(&rule(width));
    output.push('\n');
    output.push_str(&file.contents);
    if !file.contents.ends_with('\n') {
        output.push('\n');
    }
    output
}

/// Format search results
pub fn format_search(phrase: &str, results: &SearchResults) -> String {
    if results.is_empty() {
        return "No results.".to_string();
    }

    let width = output_width();
    let count = result_count(results);
    let mut output = String::new();
    output.push_str(&format!(
        "Search results for: \"{}\" ({} {})\n",
        phrase.bold(),
        count,
        if count == 1 { "match" } else { "matches" }
    ));
    output.push_str(&rule(width));
    output.push('\n');

    for (category, records) in results {
        for (script, record) in records {
            let info = ItemInfo {
                title: record.title.clone(),
                keywords: record.keywords.clone(),
                description: record.description.clone(),
            };
            push_summary(&mut output, category, script, &info, width);
        }
    }

    output
}

/// Format the cache status
pub fn format_cache_status(status: &CacheStatus) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Status".bold()));
    output.push_str(&format!("Location: {}\n\n", status.path.display()));

    if !status.exists {
        output.push_str(&format!("  {}\n", "Not cached".dimmed()));
        return output.trim_end().to_string();
    }

    match (status.count, status.age_secs) {
        (Some(count), Some(age)) => {
            output.push_str(&format!("  Entries: {}\n", count));
            let state = if status.fresh {
                "(fresh)".green()
            } else {
                "(stale)".yellow()
            };
            output.push_str(&format!("  Age: {} {}\n", format_age(age), state));
            output.push_str(&format!("  TTL: {}\n", format_age(status.ttl_secs)));
        }
        _ => output.push_str(&format!("  {}\n", "Unreadable or invalid".yellow())),
    }

    output.trim_end().to_string()
}
