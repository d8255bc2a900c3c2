// dbpeek-core/src/infrastructure/adapters/duckdb.rs

use duckdb::types::Value as DuckValue;
use duckdb::{AccessMode, Config, Connection};
use std::path::Path;
use tracing::debug;

use crate::domain::{ColumnDescriptor, Engine, Quoter, SampleRow, Value};
use crate::error::PeekError;
use crate::infrastructure::error::DatabaseError;
use crate::ports::CatalogReader;

const LIST_TABLES: &str = "SELECT table_name FROM information_schema.tables \
     WHERE table_type = 'BASE TABLE' AND table_schema = current_schema()";

// Bound table name: a dotted name like "v1.events" is never split into schema.table
const TABLE_COLUMNS: &str = "SELECT c.column_index - 1, c.column_name, c.data_type, \
     NOT c.is_nullable, c.column_default, \
     EXISTS (SELECT 1 FROM duckdb_constraints() k \
             WHERE k.database_name = c.database_name AND k.schema_name = c.schema_name \
               AND k.table_name = c.table_name AND k.constraint_type = 'PRIMARY KEY' \
               AND list_contains(k.constraint_column_names, c.column_name)) \
     FROM duckdb_columns() c \
     WHERE c.database_name = current_database() AND c.schema_name = current_schema() \
       AND c.table_name = ? \
     ORDER BY c.column_index";

/// Types whose values map onto `Value` directly. Everything else (dates,
/// timestamps, decimals, intervals, nested types...) is cast to VARCHAR so
/// the engine produces its own text form.
const NATIVE_TYPES: [&str; 15] = [
    "BOOLEAN", "TINYINT", "SMALLINT", "INTEGER", "BIGINT", "HUGEINT", "UTINYINT",
    "USMALLINT", "UINTEGER", "UBIGINT", "FLOAT", "DOUBLE", "VARCHAR", "BLOB", "UUID",
];

pub struct DuckDbReader {
    conn: Connection,
    path: String,
}

impl DuckDbReader {
    pub fn open(db_path: &Path) -> Result<Self, DatabaseError> {
        let path = db_path.display().to_string();
        // Read-only mode refuses to create a missing file and takes no write lock
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| DatabaseError::connection(path.as_str(), e))?;
        let conn = Connection::open_with_flags(db_path, config)
            .map_err(|e| DatabaseError::connection(path.as_str(), e))?;

        debug!(%path, "DuckDB connection opened");
        Ok(Self { conn, path })
    }
}

impl CatalogReader for DuckDbReader {
    fn engine(&self) -> Engine {
        Engine::DuckDb
    }

    fn list_tables(&self) -> Result<Vec<String>, PeekError> {
        let mut stmt = self.conn.prepare(LIST_TABLES)?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, PeekError> {
        let mut stmt = self.conn.prepare(TABLE_COLUMNS)?;
        let columns = stmt
            .query_map([table], |row| {
                Ok(ColumnDescriptor {
                    position: row.get(0)?,
                    name: row.get(1)?,
                    declared_type: row.get(2)?,
                    not_null: row.get(3)?,
                    default_value: row.get(4)?,
                    primary_key: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    fn sample_row(&self, table: &str) -> Result<Option<SampleRow>, PeekError> {
        let columns = self.describe_columns(table)?;
        let sql = format!(
            "SELECT {} FROM {} LIMIT 1",
            projection(&columns),
            Quoter::identifier(table)
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let values = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = row.get::<_, DuckValue>(i)?;
                Ok(if is_native(&column.declared_type) {
                    to_value(value)
                } else {
                    engine_text(value)
                })
            })
            .collect::<Result<Vec<_>, duckdb::Error>>()?;
        Ok(Some(SampleRow(values)))
    }
}

impl Drop for DuckDbReader {
    fn drop(&mut self) {
        debug!(path = %self.path, "DuckDB connection released");
    }
}

fn is_native(declared_type: &str) -> bool {
    let declared = declared_type.trim().to_ascii_uppercase();
    NATIVE_TYPES.contains(&declared.as_str())
}

fn projection(columns: &[ColumnDescriptor]) -> String {
    if columns.is_empty() {
        return "*".to_string();
    }
    columns
        .iter()
        .map(|column| {
            let name = Quoter::identifier(&column.name);
            if is_native(&column.declared_type) {
                name
            } else {
                format!("CAST({} AS VARCHAR)", name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Value of a column cast to VARCHAR: printed as the engine wrote it, unquoted.
fn engine_text(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Text(s) => Value::Other(s),
        other => to_value(other),
    }
}

fn to_value(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Boolean(b),
        DuckValue::TinyInt(i) => Value::Integer(i.into()),
        DuckValue::SmallInt(i) => Value::Integer(i.into()),
        DuckValue::Int(i) => Value::Integer(i.into()),
        DuckValue::BigInt(i) => Value::Integer(i),
        DuckValue::UTinyInt(i) => Value::Integer(i.into()),
        DuckValue::USmallInt(i) => Value::Integer(i.into()),
        DuckValue::UInt(i) => Value::Integer(i.into()),
        DuckValue::UBigInt(i) => i64::try_from(i)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Other(i.to_string())),
        DuckValue::HugeInt(i) => i64::try_from(i)
            .map(Value::Integer)
            .unwrap_or_else(|_| Value::Other(i.to_string())),
        DuckValue::Float(f) => Value::Real(f.into()),
        DuckValue::Double(f) => Value::Real(f),
        DuckValue::Text(s) => Value::Text(s),
        DuckValue::Blob(b) => Value::Blob(b),
        // Unreachable for columns outside NATIVE_TYPES, which are cast to VARCHAR
        other => Value::Other(format!("{:?}", other)),
    }
}
