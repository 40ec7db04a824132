//! Archtext CLI - renders the text files of an archive into one document.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Render(args) => {
            commands::render::execute(args, &*formatter, !(cli.quiet || cli.json))
        }
        cli::Commands::Inspect(args) => commands::inspect::execute(args, &*formatter),
        cli::Commands::Completion { shell } => {
            commands::completion::execute(*shell);
            Ok(())
        }
    }
}

/// Logs go to stderr. `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
