//! Domain events for the Character Catalog context.

use dm_companion_core::event::{DomainEvent, EventMetadata};
use dm_companion_core::records::Character;
use serde::{Deserialize, Serialize};

/// Emitted when a character is added to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCreated {
    /// The stored character.
    pub character: Character,
}

/// Event type identifier for [`CharacterCreated`].
pub const CHARACTER_CREATED_EVENT_TYPE: &str = "character.character_created";

/// Event payload variants for the Character Catalog context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CharacterEventKind {
    /// A character has been created.
    CharacterCreated(CharacterCreated),
}

/// Domain event envelope for the Character Catalog context.
#[derive(Debug, Clone)]
pub struct CharacterEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CharacterEventKind,
}

impl DomainEvent for CharacterEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            CharacterEventKind::CharacterCreated(_) => CHARACTER_CREATED_EVENT_TYPE,
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
