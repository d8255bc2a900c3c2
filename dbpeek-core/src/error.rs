// dbpeek-core/src/error.rs

use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum PeekError {
    // --- INFRASTRUCTURE (Connection, Queries, Config) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- REPORT OUTPUT ---
    #[error("Failed to write report: {0}")]
    #[diagnostic(code(dbpeek::output))]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    #[diagnostic(code(dbpeek::render))]
    Render(#[from] serde_json::Error),
}

// Shortcuts so adapters can use `?` directly on engine calls
impl From<DatabaseError> for PeekError {
    fn from(err: DatabaseError) -> Self {
        PeekError::Infrastructure(InfrastructureError::Database(err))
    }
}

impl From<rusqlite::Error> for PeekError {
    fn from(err: rusqlite::Error) -> Self {
        PeekError::Infrastructure(err.into())
    }
}

impl From<duckdb::Error> for PeekError {
    fn from(err: duckdb::Error) -> Self {
        PeekError::Infrastructure(err.into())
    }
}
