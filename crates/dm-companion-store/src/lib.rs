//! SQLite-backed implementation of the DM Companion repository traits.

pub mod schema;
pub mod sqlite_store;

pub use sqlite_store::SqliteStore;
