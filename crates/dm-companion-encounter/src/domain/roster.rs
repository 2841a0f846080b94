//! Validated snapshot of one encounter's participants.

use std::collections::{BTreeSet, HashMap};

use dm_companion_core::error::DomainError;
use dm_companion_core::records::{Character, EncounterCharacter};
use uuid::Uuid;

/// The participants of one encounter together with the characters they
/// reference.
///
/// Every entry's `character_id` is guaranteed to resolve, and no character
/// appears twice. Iteration follows the order the entries were loaded in.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<EncounterCharacter>,
    characters: HashMap<Uuid, Character>,
}

impl Roster {
    /// Validates `entries` against `catalog` and builds the roster.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DanglingReference` if an entry references a
    /// character missing from `catalog`.
    /// Returns `DomainError::DuplicateParticipant` if two entries reference
    /// the same character.
    pub fn load(
        entries: Vec<EncounterCharacter>,
        catalog: &[Character],
    ) -> Result<Self, DomainError> {
        let lookup: HashMap<Uuid, &Character> = catalog.iter().map(|c| (c.id, c)).collect();
        let mut characters = HashMap::with_capacity(entries.len());

        for entry in &entries {
            let Some(character) = lookup.get(&entry.character_id) else {
                return Err(DomainError::DanglingReference {
                    participant_id: entry.id,
                    character_id: entry.character_id,
                });
            };
            if characters
                .insert(entry.character_id, (*character).clone())
                .is_some()
            {
                return Err(DomainError::DuplicateParticipant {
                    character_id: entry.character_id,
                });
            }
        }

        Ok(Self {
            entries,
            characters,
        })
    }

    /// Identifiers of the characters currently in the roster.
    #[must_use]
    pub fn members(&self) -> BTreeSet<Uuid> {
        self.entries.iter().map(|e| e.character_id).collect()
    }

    /// Returns `true` if `character_id` is in the roster.
    #[must_use]
    pub fn contains(&self, character_id: Uuid) -> bool {
        self.characters.contains_key(&character_id)
    }

    /// The participants, in load order.
    #[must_use]
    pub fn entries(&self) -> &[EncounterCharacter] {
        &self.entries
    }

    /// The character a roster member refers to.
    #[must_use]
    pub fn character(&self, character_id: Uuid) -> Option<&Character> {
        self.characters.get(&character_id)
    }

    /// Participants paired with their resolved characters, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (&EncounterCharacter, &Character)> {
        // `load` resolved every entry, so indexing cannot miss.
        self.entries
            .iter()
            .map(|entry| (entry, &self.characters[&entry.character_id]))
    }

    /// Number of participants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the roster has no participants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
