use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codeshelf::cli::args::{Cli, Commands, CompletionsArgs, OutputFormat};
use codeshelf::cli::commands;
use codeshelf::config::Config;
use codeshelf::error::ShelfError;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run() -> Result<(), ShelfError> {
    let cli = Cli::parse();
    init_logging(&cli);

    // Handle completions command early (no config needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let mut config = Config::load()?;
    let format = cli
        .output
        .unwrap_or_else(|| OutputFormat::from_config(&config.output.format));

    let output = match &cli.command {
        Commands::Completions(_) => unreachable!(), // Handled above
        Commands::Config(args) => commands::config(&mut config, args, format)?,
        command => {
            let config = config.with_overrides(cli.root.as_deref(), cli.cache_dir.as_deref());

            match command {
                Commands::Categories => commands::categories(&config, format)?,
                Commands::List(args) => commands::list(&config, args, format)?,
                Commands::Show(args) => commands::show(&config, args, format)?,
                Commands::Cat(args) => commands::cat(&config, args, format)?,
                Commands::Download(args) => commands::download(&config, args, format)?,
                Commands::Search(args) => commands::search(&config, args, format)?,
                Commands::Keyword(args) => commands::keyword(&config, args, format)?,
                Commands::Cache(args) => commands::cache(&config, args, format)?,
                Commands::Config(_) | Commands::Completions(_) => unreachable!(),
            }
        }
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
