pub mod catalog;

pub use catalog::CatalogReader;
