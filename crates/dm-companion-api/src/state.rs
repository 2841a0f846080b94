//! Shared application state.

use std::sync::Arc;

use dm_companion_core::clock::Clock;
use dm_companion_core::repository::{CharacterRepository, EncounterRepository};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of creation timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Character catalog.
    pub characters: Arc<dyn CharacterRepository>,
    /// Encounters and their participants.
    pub encounters: Arc<dyn EncounterRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        characters: Arc<dyn CharacterRepository>,
        encounters: Arc<dyn EncounterRepository>,
    ) -> Self {
        Self {
            clock,
            characters,
            encounters,
        }
    }
}
