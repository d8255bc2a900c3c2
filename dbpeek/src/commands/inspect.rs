// dbpeek/src/commands/inspect.rs
//
// USE CASE: Inspect a database file (tables + first table schema + sample row).

use std::io;
use std::path::{Path, PathBuf};

use dbpeek_core::PeekError;
use dbpeek_core::application::Inspector;
use dbpeek_core::domain::{Engine, OutputFormat};
use dbpeek_core::infrastructure::adapters::open_catalog;
use dbpeek_core::infrastructure::config::load_settings;

pub fn execute(
    db_path: Option<PathBuf>,
    engine: Option<Engine>,
    format: Option<OutputFormat>,
    config: Option<PathBuf>,
) -> Result<(), PeekError> {
    // A. Resolve settings: file < env < CLI
    let request = load_settings(config.as_deref(), Path::new("."))?
        .with_overrides(db_path, engine, format)
        .into_request()?;
    tracing::debug!(?request, "Inspection requested");

    // B. Connect (read-only). Fails here if the file is missing or not a database.
    let reader = open_catalog(&request.database, request.engine)?;

    // C. Run. The inspector owns the connection and releases it on return.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Inspector::new(reader).run(request.format, &mut out)?;

    Ok(())
}
