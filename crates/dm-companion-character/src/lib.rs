//! DM Companion: Character Catalog bounded context.
//!
//! Responsible for the reusable character templates that encounters draw
//! their participants from.

pub mod application;
pub mod domain;
