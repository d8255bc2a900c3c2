// dbpeek/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing) on stderr, stdout is reserved for the report.
    // RUST_LOG=debug dbpeek app.sqlite to see every query
    init_tracing(cli.verbose);

    // 2. Inspect. Any error is fatal and rendered by miette.
    commands::inspect::execute(cli.db_path, cli.engine, cli.format, cli.config)?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
