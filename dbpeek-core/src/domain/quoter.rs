// dbpeek-core/src/domain/quoter.rs
//
// Table names come from the catalog and may contain anything the engine
// accepts, so they are always quoted before being spliced into SQL.

pub struct Quoter;

impl Quoter {
    /// `users` -> `"users"`, `we"ird` -> `"we""ird"`
    pub fn identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
