// dbpeek-core/src/lib.rs

// 1. Memory safety
#![deny(unsafe_code)]
// 2. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 3. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// The contract every database engine fulfils (catalog, schema, sample).
pub mod ports;

// 2. Domain
// Column descriptors, values, the inspection report, identifier quoting.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (Adapters)
// SQLite and DuckDB readers, engine detection, settings files.
pub mod infrastructure;

// 4. Application (Use Cases)
// The inspector and its text/JSON rendering.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::PeekError;
