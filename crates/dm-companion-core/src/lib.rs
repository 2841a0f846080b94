//! DM Companion Core: shared domain abstractions.
//!
//! This crate defines the record types, repository traits, and error type
//! that the character and encounter contexts depend on. It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod records;
pub mod repository;
