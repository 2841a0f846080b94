//! Repository traits for the command layer.
//!
//! The encounter and character contexts never touch storage directly; they
//! read snapshots and delegate writes through these traits.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::records::{Character, Encounter, EncounterCharacter, EncounterDetail};

/// Storage for the character catalog.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Load the full catalog in creation order.
    async fn list_characters(&self) -> Result<Vec<Character>, DomainError>;

    /// Persist a new character.
    async fn create_character(&self, character: &Character) -> Result<(), DomainError>;
}

/// Storage for encounters and their participants.
#[async_trait]
pub trait EncounterRepository: Send + Sync {
    /// Load all encounters in creation order.
    async fn list_encounters(&self) -> Result<Vec<Encounter>, DomainError>;

    /// Persist a new encounter.
    async fn create_encounter(&self, encounter: &Encounter) -> Result<(), DomainError>;

    /// Load an encounter and its participants in join order.
    ///
    /// Returns `DomainError::EncounterNotFound` when the encounter does not
    /// exist.
    async fn load_encounter(&self, encounter_id: Uuid) -> Result<EncounterDetail, DomainError>;

    /// Create a participant in the encounter and return the stored record.
    ///
    /// Implementations report a second participation of the same character
    /// as `DomainError::AlreadyMember`.
    async fn add_participant(
        &self,
        encounter_id: Uuid,
        participant: &EncounterCharacter,
    ) -> Result<EncounterCharacter, DomainError>;

    /// Overwrite a participant's initiative and current hit points.
    ///
    /// Returns `DomainError::ParticipantNotFound` when the participant is not
    /// in the encounter.
    async fn update_participant(
        &self,
        encounter_id: Uuid,
        participant_id: Uuid,
        initiative: Option<i32>,
        current_hit_points: i32,
    ) -> Result<EncounterCharacter, DomainError>;
}
