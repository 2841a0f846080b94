//! Test repositories: in-memory and failing implementations of the
//! repository traits.

use std::sync::Mutex;

use async_trait::async_trait;
use dm_companion_core::error::DomainError;
use dm_companion_core::records::{Character, Encounter, EncounterCharacter, EncounterDetail};
use dm_companion_core::repository::{CharacterRepository, EncounterRepository};
use uuid::Uuid;

/// A character catalog held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryCharacterRepository {
    characters: Mutex<Vec<Character>>,
}

impl InMemoryCharacterRepository {
    /// Create a repository seeded with `characters`.
    #[must_use]
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters: Mutex::new(characters),
        }
    }

    /// Returns a snapshot of the stored characters.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn characters(&self) -> Vec<Character> {
        self.characters.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterRepository for InMemoryCharacterRepository {
    async fn list_characters(&self) -> Result<Vec<Character>, DomainError> {
        Ok(self.characters.lock().unwrap().clone())
    }

    async fn create_character(&self, character: &Character) -> Result<(), DomainError> {
        self.characters.lock().unwrap().push(character.clone());
        Ok(())
    }
}

/// Encounters held in memory. Records every participant it was asked to add
/// and can be configured to reject all writes.
#[derive(Debug, Default)]
pub struct InMemoryEncounterRepository {
    encounters: Mutex<Vec<EncounterDetail>>,
    added: Mutex<Vec<(Uuid, EncounterCharacter)>>,
    reject_writes: bool,
}

impl InMemoryEncounterRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose writes all fail with an infrastructure
    /// error while reads keep working.
    #[must_use]
    pub fn rejecting_writes() -> Self {
        Self {
            reject_writes: true,
            ..Self::default()
        }
    }

    /// Seed an encounter with its participants.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_encounter(self, encounter: Encounter, participants: Vec<EncounterCharacter>) -> Self {
        self.encounters.lock().unwrap().push(EncounterDetail {
            encounter,
            participants,
        });
        self
    }

    /// Returns every `(encounter_id, participant)` passed to a successful
    /// `add_participant` call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn added_participants(&self) -> Vec<(Uuid, EncounterCharacter)> {
        self.added.lock().unwrap().clone()
    }

    /// Returns the stored participants of an encounter, if it exists.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn participants(&self, encounter_id: Uuid) -> Option<Vec<EncounterCharacter>> {
        self.encounters
            .lock()
            .unwrap()
            .iter()
            .find(|detail| detail.encounter.id == encounter_id)
            .map(|detail| detail.participants.clone())
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.reject_writes {
            return Err(DomainError::Infrastructure("database is read-only".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EncounterRepository for InMemoryEncounterRepository {
    async fn list_encounters(&self) -> Result<Vec<Encounter>, DomainError> {
        Ok(self
            .encounters
            .lock()
            .unwrap()
            .iter()
            .map(|detail| detail.encounter.clone())
            .collect())
    }

    async fn create_encounter(&self, encounter: &Encounter) -> Result<(), DomainError> {
        self.check_writable()?;
        self.encounters.lock().unwrap().push(EncounterDetail {
            encounter: encounter.clone(),
            participants: Vec::new(),
        });
        Ok(())
    }

    async fn load_encounter(&self, encounter_id: Uuid) -> Result<EncounterDetail, DomainError> {
        self.encounters
            .lock()
            .unwrap()
            .iter()
            .find(|detail| detail.encounter.id == encounter_id)
            .cloned()
            .ok_or(DomainError::EncounterNotFound(encounter_id))
    }

    async fn add_participant(
        &self,
        encounter_id: Uuid,
        participant: &EncounterCharacter,
    ) -> Result<EncounterCharacter, DomainError> {
        self.check_writable()?;
        let mut encounters = self.encounters.lock().unwrap();
        let detail = encounters
            .iter_mut()
            .find(|detail| detail.encounter.id == encounter_id)
            .ok_or(DomainError::EncounterNotFound(encounter_id))?;
        if detail
            .participants
            .iter()
            .any(|p| p.character_id == participant.character_id)
        {
            return Err(DomainError::AlreadyMember {
                encounter_id,
                character_id: participant.character_id,
            });
        }
        detail.participants.push(participant.clone());
        self.added
            .lock()
            .unwrap()
            .push((encounter_id, participant.clone()));
        Ok(participant.clone())
    }

    async fn update_participant(
        &self,
        encounter_id: Uuid,
        participant_id: Uuid,
        initiative: Option<i32>,
        current_hit_points: i32,
    ) -> Result<EncounterCharacter, DomainError> {
        self.check_writable()?;
        let mut encounters = self.encounters.lock().unwrap();
        let participant = encounters
            .iter_mut()
            .find(|detail| detail.encounter.id == encounter_id)
            .ok_or(DomainError::EncounterNotFound(encounter_id))?
            .participants
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or(DomainError::ParticipantNotFound {
                encounter_id,
                participant_id,
            })?;
        participant.initiative = initiative;
        participant.current_hit_points = current_hit_points;
        Ok(participant.clone())
    }
}

/// A character repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingCharacterRepository;

#[async_trait]
impl CharacterRepository for FailingCharacterRepository {
    async fn list_characters(&self) -> Result<Vec<Character>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn create_character(&self, _character: &Character) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}

/// An encounter repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingEncounterRepository;

#[async_trait]
impl EncounterRepository for FailingEncounterRepository {
    async fn list_encounters(&self) -> Result<Vec<Encounter>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn create_encounter(&self, _encounter: &Encounter) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_encounter(&self, _encounter_id: Uuid) -> Result<EncounterDetail, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn add_participant(
        &self,
        _encounter_id: Uuid,
        _participant: &EncounterCharacter,
    ) -> Result<EncounterCharacter, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update_participant(
        &self,
        _encounter_id: Uuid,
        _participant_id: Uuid,
        _initiative: Option<i32>,
        _current_hit_points: i32,
    ) -> Result<EncounterCharacter, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
