//! Query handlers for the Encounter context.
//!
//! This module contains query handlers that load a roster snapshot and
//! return read-only view DTOs derived from it.

use chrono::{DateTime, Utc};
use dm_companion_core::error::DomainError;
use dm_companion_core::records::{Character, Encounter};
use dm_companion_core::repository::{CharacterRepository, EncounterRepository};
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::membership;
use crate::domain::turn_order::{TurnEntry, compute_turn_order};

/// Read-only view of an encounter with its derived turn order.
#[derive(Debug, Serialize)]
pub struct EncounterDetailView {
    /// The encounter identifier.
    pub encounter_id: Uuid,
    /// The encounter title.
    pub title: String,
    /// When the encounter was created.
    pub created_at: DateTime<Utc>,
    /// Participants in the order they act.
    pub turn_order: Vec<TurnEntry>,
}

/// Returns all encounters in creation order.
///
/// # Errors
///
/// Returns the repository's error if the encounters cannot be loaded.
pub async fn list_encounters(repo: &dyn EncounterRepository) -> Result<Vec<Encounter>, DomainError> {
    repo.list_encounters().await
}

/// Retrieves an encounter and computes its turn order.
///
/// # Errors
///
/// Returns `DomainError::EncounterNotFound` if the encounter does not exist.
/// Returns `DomainError::DanglingReference` if a participant references a
/// character missing from the catalog.
pub async fn get_encounter_detail(
    encounter_id: Uuid,
    characters: &dyn CharacterRepository,
    encounters: &dyn EncounterRepository,
) -> Result<EncounterDetailView, DomainError> {
    let snapshot = command_handlers::load_snapshot(encounter_id, characters, encounters).await?;
    Ok(EncounterDetailView {
        encounter_id,
        title: snapshot.encounter.title,
        created_at: snapshot.encounter.created_at,
        turn_order: compute_turn_order(&snapshot.roster),
    })
}

/// Returns the catalog characters that can still join the encounter, in
/// catalog order.
///
/// # Errors
///
/// Returns `DomainError::EncounterNotFound` if the encounter does not exist.
/// Returns `DomainError::DanglingReference` if a participant references a
/// character missing from the catalog.
pub async fn list_eligible_characters(
    encounter_id: Uuid,
    characters: &dyn CharacterRepository,
    encounters: &dyn EncounterRepository,
) -> Result<Vec<Character>, DomainError> {
    let snapshot = command_handlers::load_snapshot(encounter_id, characters, encounters).await?;
    Ok(membership::eligible(&snapshot.catalog, &snapshot.roster)
        .into_iter()
        .cloned()
        .collect())
}
