//! Application layer for the Character Catalog context.

pub mod command_handlers;
pub mod query_handlers;
