// dbpeek-core/src/infrastructure/adapters/sqlite.rs

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

use crate::domain::{ColumnDescriptor, Engine, Quoter, SampleRow, Value};
use crate::error::PeekError;
use crate::infrastructure::error::DatabaseError;
use crate::ports::CatalogReader;

const LIST_TABLES: &str = "SELECT name FROM sqlite_master WHERE type='table'";
const TABLE_INFO: &str =
    "SELECT cid, name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1)";

pub struct SqliteReader {
    conn: Connection,
    path: String,
}

impl SqliteReader {
    pub fn open(db_path: &Path) -> Result<Self, DatabaseError> {
        let path = db_path.display().to_string();
        // No SQLITE_OPEN_CREATE: a missing file is an error, never an empty new database
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(db_path, flags)
            .map_err(|e| DatabaseError::connection(path.as_str(), e))?;

        // SQLite opens lazily; reading the header here turns "not a database"
        // and "database is locked" into connection errors.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(|e| DatabaseError::connection(path.as_str(), e))?;

        debug!(%path, "SQLite connection opened");
        Ok(Self { conn, path })
    }
}

impl CatalogReader for SqliteReader {
    fn engine(&self) -> Engine {
        Engine::Sqlite
    }

    fn list_tables(&self) -> Result<Vec<String>, PeekError> {
        let mut stmt = self.conn.prepare(LIST_TABLES)?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, PeekError> {
        let mut stmt = self.conn.prepare(TABLE_INFO)?;
        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnDescriptor {
                    position: row.get(0)?,
                    name: row.get(1)?,
                    declared_type: row.get(2)?,
                    not_null: row.get(3)?,
                    default_value: row.get(4)?,
                    // pk is the 1-based position inside the primary key, 0 otherwise
                    primary_key: row.get::<_, i64>(5)? > 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn sample_row(&self, table: &str) -> Result<Option<SampleRow>, PeekError> {
        let sql = format!("SELECT * FROM {} LIMIT 1", Quoter::identifier(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let column_count = stmt.column_count();
        let mut rows = stmt.query([])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let values = (0..column_count)
            .map(|i| row.get_ref(i).map(to_value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(SampleRow(values)))
    }
}

impl Drop for SqliteReader {
    fn drop(&mut self) {
        debug!(path = %self.path, "SQLite connection released");
    }
}

fn to_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        // SQLite does not enforce encoding; invalid UTF-8 is kept byte for byte
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::Text(text.to_owned()),
            Err(_) => Value::Blob(bytes.to_vec()),
        },
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(sql: &str) -> Result<(TempDir, PathBuf)> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("fixture.sqlite");
        let conn = Connection::open(&path)?;
        conn.execute_batch(sql)?;
        conn.close().map_err(|(_, e)| e)?;
        Ok((dir, path))
    }

    #[test]
    fn test_sqlite_flow() -> Result<()> {
        let (_dir, path) = fixture(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL DEFAULT 'anon', avatar BLOB, score REAL);
             INSERT INTO users VALUES (1, 'a', x'00ff', 2.5);",
        )?;
        let reader = SqliteReader::open(&path)?;

        assert_eq!(reader.list_tables()?, vec!["users".to_string()]);

        let columns = reader.describe_columns("users")?;
        let names: Vec<_> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "avatar", "score"]);
        assert_eq!(columns[0].declared_type, "INTEGER");
        assert!(columns[0].primary_key);
        assert!(columns[1].not_null);
        assert_eq!(columns[1].default_value.as_deref(), Some("'anon'"));
        assert_eq!(columns[2].position, 2);

        let row = reader.sample_row("users")?.expect("one row");
        assert_eq!(
            row.values(),
            [
                Value::Integer(1),
                Value::Text("a".into()),
                Value::Blob(vec![0x00, 0xff]),
                Value::Real(2.5),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_empty_table_has_no_sample() -> Result<()> {
        let (_dir, path) = fixture("CREATE TABLE empty (id INTEGER);")?;
        let reader = SqliteReader::open(&path)?;
        assert_eq!(reader.sample_row("empty")?, None);
        Ok(())
    }

    #[test]
    fn test_awkward_table_name_is_quoted() -> Result<()> {
        let (_dir, path) = fixture(
            "CREATE TABLE \"order items\" (\"select\" TEXT);
             INSERT INTO \"order items\" VALUES ('x');",
        )?;
        let reader = SqliteReader::open(&path)?;

        let columns = reader.describe_columns("order items")?;
        assert_eq!(columns[0].name, "select");
        assert_eq!(
            reader.sample_row("order items")?,
            Some(SampleRow(vec![Value::Text("x".into())]))
        );
        Ok(())
    }

    #[test]
    fn test_reader_is_read_only() -> Result<()> {
        let (_dir, path) = fixture("CREATE TABLE t (id INTEGER);")?;
        let reader = SqliteReader::open(&path)?;
        let result = reader.conn.execute("INSERT INTO t VALUES (1)", []);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_release_allows_exclusive_lock() -> Result<()> {
        let (_dir, path) = fixture("CREATE TABLE t (id INTEGER); INSERT INTO t VALUES (1);")?;
        let reader = SqliteReader::open(&path)?;
        reader.sample_row("t")?;
        drop(reader);

        let conn = Connection::open(&path)?;
        conn.execute_batch("BEGIN EXCLUSIVE; COMMIT;")?;
        Ok(())
    }

    #[test]
    fn test_invalid_utf8_text_is_kept_as_bytes() -> Result<()> {
        let (_dir, path) = fixture(
            "CREATE TABLE words (w TEXT);
             INSERT INTO words VALUES (CAST(x'ff61' AS TEXT));",
        )?;
        let reader = SqliteReader::open(&path)?;

        let row = reader.sample_row("words")?.expect("one row");
        assert_eq!(row.values(), [Value::Blob(vec![0xff, b'a'])]);
        assert_eq!(
            crate::application::render::format_row(Some(&row)),
            "(b'\\xffa',)"
        );
        Ok(())
    }
}
