// dbpeek/src/commands/mod.rs

pub mod inspect;
