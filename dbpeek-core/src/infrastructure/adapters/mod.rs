// dbpeek-core/src/infrastructure/adapters/mod.rs

pub mod detect;
pub mod duckdb;
pub mod sqlite;

pub use self::duckdb::DuckDbReader;
pub use self::sqlite::SqliteReader;

use std::path::Path;
use tracing::{info, instrument};

use crate::domain::Engine;
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::CatalogReader;

/// Opens `db_path` read-only with the requested engine, or the detected one when `engine` is `None`.
///
/// Every failure to reach a usable database (missing file, unreadable file,
/// not a database, locked) is reported as `DatabaseError::Connection`.
#[instrument(skip(db_path), fields(path = %db_path.display()))]
pub fn open_catalog(
    db_path: &Path,
    engine: Option<Engine>,
) -> Result<Box<dyn CatalogReader>, InfrastructureError> {
    let display = db_path.display().to_string();
    if !db_path.is_file() {
        return Err(DatabaseError::connection(display, "no such database file").into());
    }

    let engine = match engine {
        Some(engine) => engine,
        None => detect::detect_engine(db_path)
            .map_err(|e| DatabaseError::connection(display.as_str(), e))?,
    };
    info!(%engine, "Opening database (read-only)");

    let reader: Box<dyn CatalogReader> = match engine {
        Engine::Sqlite => Box::new(SqliteReader::open(db_path)?),
        Engine::DuckDb => Box::new(DuckDbReader::open(db_path)?),
    };
    Ok(reader)
}
