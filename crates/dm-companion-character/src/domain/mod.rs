//! Domain layer for the Character Catalog context.

pub mod commands;
pub mod events;
