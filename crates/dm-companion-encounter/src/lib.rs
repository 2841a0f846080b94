//! DM Companion: Encounter bounded context.
//!
//! Responsible for encounter rosters, the derived turn order, and deciding
//! which characters may join an encounter.

pub mod application;
pub mod domain;
