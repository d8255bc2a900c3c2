// dbpeek-core/src/ports/catalog.rs

// What the inspector needs from a database, without knowing which engine answers.
// Each implementation owns its connection; dropping the reader releases it.

use crate::domain::{ColumnDescriptor, Engine, SampleRow};
use crate::error::PeekError;

pub trait CatalogReader {
    fn engine(&self) -> Engine;

    /// Names of all tables, in the order the catalog returns them.
    fn list_tables(&self) -> Result<Vec<String>, PeekError>;

    /// Column descriptors of `table`, in column order.
    fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, PeekError>;

    /// At most one row of `table`, unordered. `None` when the table is empty.
    fn sample_row(&self, table: &str) -> Result<Option<SampleRow>, PeekError>;
}
