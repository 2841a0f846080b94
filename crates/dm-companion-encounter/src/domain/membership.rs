//! Roster membership: who may join an encounter, and how they join.

use dm_companion_core::error::DomainError;
use dm_companion_core::records::{Character, EncounterCharacter};
use dm_companion_core::repository::EncounterRepository;
use uuid::Uuid;

use super::roster::Roster;

/// Catalog characters not yet in the roster, in catalog order.
#[must_use]
pub fn eligible<'a>(catalog: &'a [Character], roster: &Roster) -> Vec<&'a Character> {
    catalog.iter().filter(|c| !roster.contains(c.id)).collect()
}

/// Checks that `character_id` may join and builds its participant record at
/// full health with no initiative.
///
/// # Errors
///
/// Returns `DomainError::AlreadyMember` if the character is in the roster.
/// Returns `DomainError::UnknownCharacter` if it is not in `catalog`.
pub fn prepare_admission(
    catalog: &[Character],
    roster: &Roster,
    encounter_id: Uuid,
    participant_id: Uuid,
    character_id: Uuid,
) -> Result<EncounterCharacter, DomainError> {
    if roster.contains(character_id) {
        return Err(DomainError::AlreadyMember {
            encounter_id,
            character_id,
        });
    }
    let character = catalog
        .iter()
        .find(|c| c.id == character_id)
        .ok_or(DomainError::UnknownCharacter(character_id))?;

    Ok(EncounterCharacter {
        id: participant_id,
        character_id,
        initiative: None,
        current_hit_points: character.hit_points,
        hit_points: character.hit_points,
    })
}

/// Adds `character_id` to the encounter through the command layer.
///
/// The roster is not modified; callers re-fetch it once this succeeds.
///
/// # Errors
///
/// Returns the errors of [`prepare_admission`] before anything is written.
/// Returns `DomainError::AlreadyMember` if the command layer reports the
/// character joined concurrently, and `DomainError::ExternalCommand` for any
/// other command layer failure.
pub async fn add(
    encounters: &dyn EncounterRepository,
    catalog: &[Character],
    roster: &Roster,
    encounter_id: Uuid,
    participant_id: Uuid,
    character_id: Uuid,
) -> Result<EncounterCharacter, DomainError> {
    let participant =
        prepare_admission(catalog, roster, encounter_id, participant_id, character_id)?;

    match encounters.add_participant(encounter_id, &participant).await {
        Ok(created) => Ok(created),
        Err(err @ DomainError::AlreadyMember { .. }) => Err(err),
        Err(err) => Err(DomainError::ExternalCommand(err.to_string())),
    }
}
