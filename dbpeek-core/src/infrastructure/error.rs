// dbpeek-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DatabaseError {
    #[error("Could not open database at '{path}': {reason}")]
    #[diagnostic(
        code(dbpeek::infra::database::connection),
        help("Check that the file exists, is a SQLite or DuckDB database and is not locked.")
    )]
    Connection { path: String, reason: String },

    #[error("SQLite Engine Error: {0}")]
    #[diagnostic(
        code(dbpeek::infra::database::sqlite),
        help("An error occurred inside the SQL engine.")
    )]
    Sqlite(#[from] rusqlite::Error),

    #[error("DuckDB Engine Error: {0}")]
    #[diagnostic(
        code(dbpeek::infra::database::duckdb),
        help("An error occurred inside the SQL engine.")
    )]
    DuckDB(#[from] duckdb::Error),
}

impl DatabaseError {
    pub fn connection(path: impl Into<String>, reason: impl ToString) -> Self {
        DatabaseError::Connection {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- DATABASE (Abstracted) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DatabaseError),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(dbpeek::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(dbpeek::infra::yaml),
        help("Check your YAML syntax (indentation, types, unknown keys).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(
        code(dbpeek::infra::config),
        help("Pass a database path as argument, set DBPEEK_DB_PATH, or add `database:` to dbpeek.yaml.")
    )]
    ConfigError(String),

    #[error("Settings file not found at '{0}'")]
    #[diagnostic(code(dbpeek::infra::config_missing))]
    ConfigNotFound(String),
}

// Manual implementation for shortcuts (e.g. `?` operator on engine calls)
impl From<rusqlite::Error> for InfrastructureError {
    fn from(err: rusqlite::Error) -> Self {
        InfrastructureError::Database(DatabaseError::Sqlite(err))
    }
}

impl From<duckdb::Error> for InfrastructureError {
    fn from(err: duckdb::Error) -> Self {
        InfrastructureError::Database(DatabaseError::DuckDB(err))
    }
}
