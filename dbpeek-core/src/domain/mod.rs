pub mod catalog;
pub mod engine;
pub mod quoter;

// Convenient re-exports to simplify imports elsewhere
pub use catalog::{ColumnDescriptor, InspectionReport, SampleRow, TableSchema, Value};
pub use engine::{Engine, OutputFormat};
pub use quoter::Quoter;
