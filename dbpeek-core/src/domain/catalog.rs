// dbpeek-core/src/domain/catalog.rs
//
// Engine-independent view of what the inspector reads from a database.

use serde::Serialize;

use super::engine::Engine;

/// One column of a table, as reported by the engine's schema introspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Ordinal position (0-based, `cid` in `table_info`).
    pub position: i64,
    pub name: String,
    /// Declared type as written in the DDL. May be empty for untyped SQLite columns.
    pub declared_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// A single cell value, normalized across engines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Text(String),
    Blob(Vec<u8>),
    /// Engine-specific value (timestamp, decimal, nested type...) kept in its textual form.
    Other(String),
}

/// One row fetched for manual inspection. No ordering guarantee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleRow(pub Vec<Value>);

impl SampleRow {
    pub fn values(&self) -> &[Value] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Everything one inspection run collected.
///
/// `schema` and `sample_row` stay `None` when the catalog lists no table;
/// `sample_row` is also `None` when the first table is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub engine: Engine,
    pub tables: Vec<String>,
    pub schema: Option<TableSchema>,
    pub sample_row: Option<SampleRow>,
}

impl InspectionReport {
    pub fn new(engine: Engine, tables: Vec<String>) -> Self {
        Self {
            engine,
            tables,
            schema: None,
            sample_row: None,
        }
    }

    pub fn first_table(&self) -> Option<&str> {
        self.tables.first().map(String::as_str)
    }
}
