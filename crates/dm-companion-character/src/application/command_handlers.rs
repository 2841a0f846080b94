//! Command handlers for the Character Catalog context.
//!
//! This module contains application-level command handler functions that
//! validate input, build the record, and delegate the write to the
//! repository.

use dm_companion_core::clock::Clock;
use dm_companion_core::error::DomainError;
use dm_companion_core::event::EventMetadata;
use dm_companion_core::records::Character;
use dm_companion_core::repository::CharacterRepository;
use tracing::debug;

use crate::domain::commands::CreateCharacter;
use crate::domain::events::{
    CHARACTER_CREATED_EVENT_TYPE, CharacterCreated, CharacterEvent, CharacterEventKind,
};

fn validate(command: &CreateCharacter) -> Result<(), DomainError> {
    for (field, value) in [
        ("name", &command.name),
        ("class", &command.class),
        ("race", &command.race),
    ] {
        if value.trim().is_empty() {
            return Err(DomainError::Validation(format!(
                "character {field} must not be empty"
            )));
        }
    }
    if command.level < 1 {
        return Err(DomainError::Validation(
            "character level must be at least 1".into(),
        ));
    }
    if command.experience < 0 {
        return Err(DomainError::Validation(
            "character experience must not be negative".into(),
        ));
    }
    if command.hit_points < 1 {
        return Err(DomainError::Validation(
            "character hit points must be at least 1".into(),
        ));
    }
    if command.armor_class < 0 {
        return Err(DomainError::Validation(
            "character armor class must not be negative".into(),
        ));
    }
    Ok(())
}

/// Handles the `CreateCharacter` command: validates the input, stores the
/// new character, and returns the resulting event.
///
/// # Errors
///
/// Returns `DomainError::Validation` if a field is blank or out of range.
/// Returns the repository's error if the write fails.
pub async fn handle_create_character(
    command: &CreateCharacter,
    clock: &dyn Clock,
    repo: &dyn CharacterRepository,
) -> Result<CharacterEvent, DomainError> {
    validate(command)?;

    let now = clock.now();
    let character = Character {
        id: command.character_id,
        name: command.name.trim().to_owned(),
        class: command.class.trim().to_owned(),
        race: command.race.trim().to_owned(),
        background: command
            .background
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_owned),
        level: command.level,
        experience: command.experience,
        hit_points: command.hit_points,
        armor_class: command.armor_class,
        notes: command.notes.clone(),
        created_at: now,
    };

    repo.create_character(&character).await?;
    debug!(character_id = %character.id, "character stored");

    Ok(CharacterEvent {
        metadata: EventMetadata::new(
            CHARACTER_CREATED_EVENT_TYPE,
            character.id,
            command.correlation_id,
            now,
        ),
        kind: CharacterEventKind::CharacterCreated(CharacterCreated { character }),
    })
}
