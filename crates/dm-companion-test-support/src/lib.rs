//! Shared test doubles and fixtures for the DM Companion encounter tracker.

mod clock;
mod fixtures;
mod repository;

pub use clock::FixedClock;
pub use fixtures::{character, encounter, participant};
pub use repository::{
    FailingCharacterRepository, FailingEncounterRepository, InMemoryCharacterRepository,
    InMemoryEncounterRepository,
};
