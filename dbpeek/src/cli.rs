// dbpeek/src/cli.rs
//
// Single source of truth for the CLI definition (Clap struct).

use clap::Parser;
use dbpeek_core::domain::{Engine, OutputFormat};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dbpeek")]
#[command(
    about = "🔍 Lists the tables of a SQLite or DuckDB file, describes the first one and prints a sample row",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Path to the database file
    #[arg(env = "DBPEEK_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Database engine: sqlite | duckdb (detected from the file when omitted)
    #[arg(long, short, env = "DBPEEK_ENGINE")]
    pub engine: Option<Engine>,

    /// Output format: text | json
    #[arg(long, short, env = "DBPEEK_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Settings file (default: dbpeek.yaml or dbpeek.yml in the working directory)
    #[arg(long, short, env = "DBPEEK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug logs on stderr (RUST_LOG takes precedence)
    #[arg(long, short)]
    pub verbose: bool,
}
