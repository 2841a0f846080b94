//! Domain layer for the Encounter context.

pub mod commands;
pub mod events;
pub mod membership;
pub mod roster;
pub mod turn_order;
