//! AdCrate Persistence - SQLite layer for the local durable store and
//! the recorder's claims table

pub mod sqlite;

pub use sqlite::Database;
