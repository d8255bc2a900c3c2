// dbpeek-core/src/infrastructure/adapters/detect.rs
//
// Engine auto-detection: file header first, then extension, then SQLite.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::domain::Engine;

const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";
const DUCKDB_MAGIC: &[u8] = b"DUCK";
const DUCKDB_MAGIC_OFFSET: usize = 8;
const HEADER_LEN: u64 = 16;

pub fn detect_engine(path: &Path) -> io::Result<Engine> {
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    File::open(path)?.take(HEADER_LEN).read_to_end(&mut header)?;

    let engine = engine_from_header(&header)
        .or_else(|| engine_from_extension(path))
        .unwrap_or(Engine::Sqlite);
    tracing::debug!(%engine, header_len = header.len(), "Engine detected");
    Ok(engine)
}

pub fn engine_from_header(header: &[u8]) -> Option<Engine> {
    if header.starts_with(SQLITE_MAGIC) {
        return Some(Engine::Sqlite);
    }
    let duck_end = DUCKDB_MAGIC_OFFSET + DUCKDB_MAGIC.len();
    if header.get(DUCKDB_MAGIC_OFFSET..duck_end) == Some(DUCKDB_MAGIC) {
        return Some(Engine::DuckDb);
    }
    None
}

pub fn engine_from_extension(path: &Path) -> Option<Engine> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "duckdb" | "ddb" => Some(Engine::DuckDb),
        "sqlite" | "sqlite3" | "db" | "db3" => Some(Engine::Sqlite),
        _ => None,
    }
}
