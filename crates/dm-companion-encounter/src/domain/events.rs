//! Domain events for the Encounter context.

use dm_companion_core::event::{DomainEvent, EventMetadata};
use dm_companion_core::records::{Encounter, EncounterCharacter};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when an encounter is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterCreated {
    /// The stored encounter.
    pub encounter: Encounter,
}

/// Emitted when a character joins an encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterCharacterCreated {
    /// The encounter joined.
    pub encounter_id: Uuid,
    /// The stored participant.
    pub participant: EncounterCharacter,
}

/// Emitted when a participant's initiative or hit points are recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatStateUpdated {
    /// The encounter the participant belongs to.
    pub encounter_id: Uuid,
    /// The participant after the update.
    pub participant: EncounterCharacter,
}

/// Event type identifier for [`EncounterCreated`].
pub const ENCOUNTER_CREATED_EVENT_TYPE: &str = "encounter.encounter_created";

/// Event type identifier for [`EncounterCharacterCreated`].
pub const ENCOUNTER_CHARACTER_CREATED_EVENT_TYPE: &str = "encounter.encounter_character_created";

/// Event type identifier for [`CombatStateUpdated`].
pub const COMBAT_STATE_UPDATED_EVENT_TYPE: &str = "encounter.combat_state_updated";

/// Event payload variants for the Encounter context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EncounterEventKind {
    /// An encounter has been created.
    EncounterCreated(EncounterCreated),
    /// A character has joined an encounter.
    EncounterCharacterCreated(EncounterCharacterCreated),
    /// A participant's combat state has been recorded.
    CombatStateUpdated(CombatStateUpdated),
}

/// Domain event envelope for the Encounter context.
#[derive(Debug, Clone)]
pub struct EncounterEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: EncounterEventKind,
}

impl DomainEvent for EncounterEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            EncounterEventKind::EncounterCreated(_) => ENCOUNTER_CREATED_EVENT_TYPE,
            EncounterEventKind::EncounterCharacterCreated(_) => {
                ENCOUNTER_CHARACTER_CREATED_EVENT_TYPE
            }
            EncounterEventKind::CombatStateUpdated(_) => COMBAT_STATE_UPDATED_EVENT_TYPE,
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
