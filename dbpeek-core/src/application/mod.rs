// dbpeek-core/src/application/mod.rs

pub mod inspector;
pub mod render;

// --- RE-EXPORTS (FACADE PATTERN) ---
pub use inspector::Inspector;
