//! Command handlers for the Encounter context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load the snapshot, validate the command, and
//! delegate the write to the repository.

use dm_companion_core::clock::Clock;
use dm_companion_core::error::DomainError;
use dm_companion_core::event::EventMetadata;
use dm_companion_core::records::{Character, Encounter};
use dm_companion_core::repository::{CharacterRepository, EncounterRepository};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::commands::{AddCharacterToEncounter, CreateEncounter, UpdateCombatState};
use crate::domain::events::{
    COMBAT_STATE_UPDATED_EVENT_TYPE, CombatStateUpdated, ENCOUNTER_CHARACTER_CREATED_EVENT_TYPE,
    ENCOUNTER_CREATED_EVENT_TYPE, EncounterCharacterCreated, EncounterCreated, EncounterEvent,
    EncounterEventKind,
};
use crate::domain::membership;
use crate::domain::roster::Roster;

/// An encounter, the catalog, and the roster validated against it.
pub(crate) struct Snapshot {
    pub encounter: Encounter,
    pub catalog: Vec<Character>,
    pub roster: Roster,
}

/// Loads an encounter and the catalog and validates the roster.
///
/// # Errors
///
/// Returns `DomainError::EncounterNotFound` if the encounter does not exist.
/// Returns `DomainError::DanglingReference` or
/// `DomainError::DuplicateParticipant` if the stored roster is inconsistent.
pub(crate) async fn load_snapshot(
    encounter_id: Uuid,
    characters: &dyn CharacterRepository,
    encounters: &dyn EncounterRepository,
) -> Result<Snapshot, DomainError> {
    let catalog = characters.list_characters().await?;
    let detail = encounters.load_encounter(encounter_id).await?;
    let roster = Roster::load(detail.participants, &catalog)?;
    Ok(Snapshot {
        encounter: detail.encounter,
        catalog,
        roster,
    })
}

/// Handles the `CreateEncounter` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the title is blank.
/// Returns the repository's error if the write fails.
pub async fn handle_create_encounter(
    command: &CreateEncounter,
    clock: &dyn Clock,
    repo: &dyn EncounterRepository,
) -> Result<EncounterEvent, DomainError> {
    let title = command.title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation(
            "encounter title must not be empty".into(),
        ));
    }

    let now = clock.now();
    let encounter = Encounter {
        id: command.encounter_id,
        title: title.to_owned(),
        created_at: now,
    };
    repo.create_encounter(&encounter).await?;
    debug!(encounter_id = %encounter.id, "encounter stored");

    Ok(EncounterEvent {
        metadata: EventMetadata::new(
            ENCOUNTER_CREATED_EVENT_TYPE,
            encounter.id,
            command.correlation_id,
            now,
        ),
        kind: EncounterEventKind::EncounterCreated(EncounterCreated { encounter }),
    })
}

/// Handles the `AddCharacterToEncounter` command: loads the current roster,
/// checks membership, and delegates the write to the command layer.
///
/// The returned event signals that the encounter's roster snapshot is stale.
///
/// # Errors
///
/// Returns `DomainError::EncounterNotFound`, `DomainError::AlreadyMember`,
/// `DomainError::UnknownCharacter`, or `DomainError::ExternalCommand`, plus
/// any roster integrity error from loading the snapshot.
pub async fn handle_add_character_to_encounter(
    command: &AddCharacterToEncounter,
    clock: &dyn Clock,
    characters: &dyn CharacterRepository,
    encounters: &dyn EncounterRepository,
) -> Result<EncounterEvent, DomainError> {
    let snapshot = load_snapshot(command.encounter_id, characters, encounters).await?;

    let participant = membership::add(
        encounters,
        &snapshot.catalog,
        &snapshot.roster,
        command.encounter_id,
        command.participant_id,
        command.character_id,
    )
    .await
    .inspect_err(|err| {
        warn!(
            encounter_id = %command.encounter_id,
            character_id = %command.character_id,
            error = %err,
            "character not added to encounter"
        );
    })?;

    debug!(
        encounter_id = %command.encounter_id,
        participant_id = %participant.id,
        "participant stored"
    );

    Ok(EncounterEvent {
        metadata: EventMetadata::new(
            ENCOUNTER_CHARACTER_CREATED_EVENT_TYPE,
            command.encounter_id,
            command.correlation_id,
            clock.now(),
        ),
        kind: EncounterEventKind::EncounterCharacterCreated(EncounterCharacterCreated {
            encounter_id: command.encounter_id,
            participant,
        }),
    })
}

/// Handles the `UpdateCombatState` command: records a participant's
/// initiative and current hit points.
///
/// # Errors
///
/// Returns `DomainError::EncounterNotFound` or
/// `DomainError::ParticipantNotFound` if the target does not exist.
/// Returns `DomainError::Validation` if current hit points exceed the
/// participant's maximum.
/// Returns the repository's error if the write fails.
pub async fn handle_update_combat_state(
    command: &UpdateCombatState,
    clock: &dyn Clock,
    repo: &dyn EncounterRepository,
) -> Result<EncounterEvent, DomainError> {
    let detail = repo.load_encounter(command.encounter_id).await?;
    let current = detail
        .participants
        .iter()
        .find(|p| p.id == command.participant_id)
        .ok_or(DomainError::ParticipantNotFound {
            encounter_id: command.encounter_id,
            participant_id: command.participant_id,
        })?;

    if command.current_hit_points > current.hit_points {
        return Err(DomainError::Validation(format!(
            "current hit points {} exceed maximum {}",
            command.current_hit_points, current.hit_points
        )));
    }

    let participant = repo
        .update_participant(
            command.encounter_id,
            command.participant_id,
            command.initiative,
            command.current_hit_points,
        )
        .await?;

    Ok(EncounterEvent {
        metadata: EventMetadata::new(
            COMBAT_STATE_UPDATED_EVENT_TYPE,
            command.encounter_id,
            command.correlation_id,
            clock.now(),
        ),
        kind: EncounterEventKind::CombatStateUpdated(CombatStateUpdated {
            encounter_id: command.encounter_id,
            participant,
        }),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use dm_companion_core::error::DomainError;
    use dm_companion_core::event::DomainEvent;
    use dm_companion_core::records::Character;
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_add_character_to_encounter, handle_create_encounter, handle_update_combat_state,
    };
    use crate::domain::commands::{AddCharacterToEncounter, CreateEncounter, UpdateCombatState};
    use crate::domain::events::EncounterEventKind;
    use dm_companion_test_support::{
        FailingCharacterRepository, FixedClock, InMemoryCharacterRepository,
        InMemoryEncounterRepository, character, encounter, participant,
    };

    fn catalog() -> Vec<Character> {
        vec![
            character(Uuid::from_u128(1), "Alaric", 20),
            character(Uuid::from_u128(2), "Brynna", 12),
        ]
    }

    fn add_command(encounter_id: Uuid, character_id: Uuid) -> AddCharacterToEncounter {
        AddCharacterToEncounter {
            correlation_id: Uuid::new_v4(),
            encounter_id,
            participant_id: Uuid::new_v4(),
            character_id,
        }
    }

    #[tokio::test]
    async fn test_handle_create_encounter_stores_trimmed_title() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let repo = InMemoryEncounterRepository::new();
        let command = CreateEncounter {
            correlation_id: Uuid::new_v4(),
            encounter_id: Uuid::new_v4(),
            title: "  Bridge of Sighs ".to_owned(),
        };

        // Act
        let event = handle_create_encounter(&command, &clock, &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(event.event_type(), "encounter.encounter_created");
        assert_eq!(event.metadata().aggregate_id, command.encounter_id);
        assert_eq!(event.metadata().correlation_id, command.correlation_id);
        assert_eq!(event.metadata().occurred_at, fixed_now);
        assert_eq!(repo.participants(command.encounter_id), Some(Vec::new()));
        match &event.kind {
            EncounterEventKind::EncounterCreated(payload) => {
                assert_eq!(payload.encounter.title, "Bridge of Sighs");
                assert_eq!(payload.encounter.created_at, fixed_now);
            }
            other => panic!("expected EncounterCreated, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_create_encounter_rejects_blank_title() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let repo = InMemoryEncounterRepository::new();
        let command = CreateEncounter {
            correlation_id: Uuid::new_v4(),
            encounter_id: Uuid::new_v4(),
            title: "   ".to_owned(),
        };

        // Act
        let result = handle_create_encounter(&command, &clock, &repo).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(repo.participants(command.encounter_id), None);
    }

    #[tokio::test]
    async fn test_handle_add_character_creates_participant_at_full_health() {
        // Arrange
        let fixed_now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = FixedClock(fixed_now);
        let encounter_id = Uuid::new_v4();
        let characters = InMemoryCharacterRepository::new(catalog());
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), Vec::new());
        let command = add_command(encounter_id, Uuid::from_u128(2));

        // Act
        let event =
            handle_add_character_to_encounter(&command, &clock, &characters, &encounters)
                .await
                .unwrap();

        // Assert
        assert_eq!(event.event_type(), "encounter.encounter_character_created");
        assert_eq!(event.metadata().aggregate_id, encounter_id);
        assert_eq!(event.metadata().occurred_at, fixed_now);
        let EncounterEventKind::EncounterCharacterCreated(payload) = &event.kind else {
            panic!("expected EncounterCharacterCreated, got {:?}", event.kind);
        };
        assert_eq!(payload.encounter_id, encounter_id);
        assert_eq!(payload.participant.id, command.participant_id);
        assert_eq!(payload.participant.character_id, Uuid::from_u128(2));
        assert_eq!(payload.participant.initiative, None);
        assert_eq!(payload.participant.current_hit_points, 12);
        assert_eq!(payload.participant.hit_points, 12);

        let stored = encounters.participants(encounter_id).unwrap();
        assert_eq!(stored, vec![payload.participant.clone()]);
    }

    #[tokio::test]
    async fn test_handle_add_character_rejects_existing_member() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let existing = participant(Uuid::from_u128(1), Some(14), 20, 20);
        let characters = InMemoryCharacterRepository::new(catalog());
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), vec![existing.clone()]);
        let command = add_command(encounter_id, Uuid::from_u128(1));

        // Act
        let result =
            handle_add_character_to_encounter(&command, &clock, &characters, &encounters).await;

        // Assert
        assert!(matches!(result, Err(DomainError::AlreadyMember { .. })));
        assert_eq!(encounters.participants(encounter_id), Some(vec![existing]));
    }

    #[tokio::test]
    async fn test_handle_add_character_rejects_unknown_character() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let characters = InMemoryCharacterRepository::new(catalog());
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), Vec::new());
        let command = add_command(encounter_id, Uuid::from_u128(404));

        // Act
        let result =
            handle_add_character_to_encounter(&command, &clock, &characters, &encounters).await;

        // Assert
        match result.unwrap_err() {
            DomainError::UnknownCharacter(id) => assert_eq!(id, Uuid::from_u128(404)),
            other => panic!("expected UnknownCharacter, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_add_character_returns_not_found_for_missing_encounter() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let characters = InMemoryCharacterRepository::new(catalog());
        let encounters = InMemoryEncounterRepository::new();
        let command = add_command(encounter_id, Uuid::from_u128(1));

        // Act
        let result =
            handle_add_character_to_encounter(&command, &clock, &characters, &encounters).await;

        // Assert
        match result.unwrap_err() {
            DomainError::EncounterNotFound(id) => assert_eq!(id, encounter_id),
            other => panic!("expected EncounterNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_add_character_surfaces_dangling_roster_reference() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let characters = InMemoryCharacterRepository::new(catalog());
        let encounters = InMemoryEncounterRepository::new().with_encounter(
            encounter(encounter_id, "Crypt"),
            vec![participant(Uuid::from_u128(500), None, 4, 4)],
        );
        let command = add_command(encounter_id, Uuid::from_u128(1));

        // Act
        let result =
            handle_add_character_to_encounter(&command, &clock, &characters, &encounters).await;

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::DanglingReference { .. })
        ));
        assert!(encounters.added_participants().is_empty());
    }

    #[tokio::test]
    async fn test_handle_add_character_wraps_rejected_write() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let characters = InMemoryCharacterRepository::new(catalog());
        let encounters = InMemoryEncounterRepository::rejecting_writes()
            .with_encounter(encounter(encounter_id, "Crypt"), Vec::new());
        let command = add_command(encounter_id, Uuid::from_u128(1));

        // Act
        let result =
            handle_add_character_to_encounter(&command, &clock, &characters, &encounters).await;

        // Assert
        assert!(matches!(result, Err(DomainError::ExternalCommand(_))));
    }

    #[tokio::test]
    async fn test_handle_add_character_propagates_catalog_failure() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), Vec::new());
        let command = add_command(encounter_id, Uuid::from_u128(1));

        // Act
        let result = handle_add_character_to_encounter(
            &command,
            &clock,
            &FailingCharacterRepository,
            &encounters,
        )
        .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_handle_update_combat_state_records_initiative_and_hit_points() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let target = participant(Uuid::from_u128(1), None, 20, 20);
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), vec![target.clone()]);
        let command = UpdateCombatState {
            correlation_id: Uuid::new_v4(),
            encounter_id,
            participant_id: target.id,
            initiative: Some(17),
            current_hit_points: -3,
        };

        // Act
        let event = handle_update_combat_state(&command, &clock, &encounters)
            .await
            .unwrap();

        // Assert
        assert_eq!(event.event_type(), "encounter.combat_state_updated");
        let stored = encounters.participants(encounter_id).unwrap();
        assert_eq!(stored[0].initiative, Some(17));
        assert_eq!(stored[0].current_hit_points, -3);
        assert_eq!(stored[0].hit_points, 20);
    }

    #[tokio::test]
    async fn test_handle_update_combat_state_rejects_hit_points_above_maximum() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let target = participant(Uuid::from_u128(1), Some(3), 10, 20);
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), vec![target.clone()]);
        let command = UpdateCombatState {
            correlation_id: Uuid::new_v4(),
            encounter_id,
            participant_id: target.id,
            initiative: Some(3),
            current_hit_points: 21,
        };

        // Act
        let result = handle_update_combat_state(&command, &clock, &encounters).await;

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(encounters.participants(encounter_id), Some(vec![target]));
    }

    #[tokio::test]
    async fn test_handle_update_combat_state_returns_not_found_for_unknown_participant() {
        // Arrange
        let clock = FixedClock(Utc::now());
        let encounter_id = Uuid::new_v4();
        let encounters = InMemoryEncounterRepository::new()
            .with_encounter(encounter(encounter_id, "Crypt"), Vec::new());
        let participant_id = Uuid::new_v4();
        let command = UpdateCombatState {
            correlation_id: Uuid::new_v4(),
            encounter_id,
            participant_id,
            initiative: None,
            current_hit_points: 1,
        };

        // Act
        let result = handle_update_combat_state(&command, &clock, &encounters).await;

        // Assert
        match result.unwrap_err() {
            DomainError::ParticipantNotFound {
                participant_id: id, ..
            } => assert_eq!(id, participant_id),
            other => panic!("expected ParticipantNotFound, got {other:?}"),
        }
    }
}
