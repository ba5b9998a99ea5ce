use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

/// Browse, view and search an archive of categorized code samples
#[derive(Parser)]
#[command(name = "codeshelf")]
#[command(version, propagate_version = true)]
#[command(about = "Browse, view and search an archive of categorized code samples")]
pub struct Cli {
    /// Output format for command results (defaults to output.format from the config)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Archive root directory (overrides archive.root)
    #[arg(long, global = true, env = "CODESHELF_ROOT")]
    pub root: Option<PathBuf>,

    /// Cache directory (overrides cache.dir)
    #[arg(long, global = true, env = "CODESHELF_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print shell completions to stdout
    pub fn print_completions(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, human-readable output
    #[default]
    Pretty,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    /// Parse the format name stored in the config file
    pub fn from_config(value: &str) -> Self {
        match value {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List all categories
    Categories,

    /// List items with their metadata, for one category or all of them
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show an item's details and files
    Show(ShowArgs),

    /// Print the contents of a file in an item
    Cat(FileArgs),

    /// Copy a file from an item to a local directory
    Download(DownloadArgs),

    /// Search titles, keywords and descriptions
    #[command(alias = "s")]
    Search(SearchArgs),

    /// Find items tagged with a keyword
    #[command(alias = "k")]
    Keyword(KeywordArgs),

    /// Manage the metadata cache
    Cache(CacheArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// Category to list (all categories when omitted)
    pub category: Option<String>,
}

/// Arguments for the show command
#[derive(Args)]
pub struct ShowArgs {
    /// Category name
    pub category: String,

    /// Item name
    pub item: String,

    /// Sub-directory to list, or file to display, relative to the item
    pub path: Option<String>,
}

/// Arguments naming one file in an item
#[derive(Args)]
pub struct FileArgs {
    /// Category name
    pub category: String,

    /// Item name
    pub item: String,

    /// File path relative to the item
    pub path: String,
}

/// Arguments for the download command
#[derive(Args)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// Destination directory
    #[arg(short, long, default_value = ".")]
    pub dest: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the search command
#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for
    pub phrase: String,

    /// Match case exactly
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,

    /// Do not search titles
    #[arg(long)]
    pub no_title: bool,

    /// Do not search keywords
    #[arg(long)]
    pub no_keywords: bool,

    /// Do not search descriptions
    #[arg(long)]
    pub no_description: bool,
}

/// Arguments for the keyword command
#[derive(Args)]
pub struct KeywordArgs {
    /// Keyword to look for
    pub keyword: String,
}

/// Arguments for the cache command
#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommands,
}

/// Cache subcommands
#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache location, age and size
    Status,
    /// Delete the cache file
    Clear,
    /// Rebuild the cache now
    Rebuild,
}

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., cache.ttl_secs)
        key: String,
        /// Value to set
        value: String,
    },
    /// Show configuration file path
    Path,
}

/// Arguments for the completions command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
