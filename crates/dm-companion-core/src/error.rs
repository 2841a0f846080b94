//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A roster entry references a character missing from the catalog.
    #[error("participant {participant_id} references unknown character {character_id}")]
    DanglingReference {
        /// The participant holding the reference.
        participant_id: Uuid,
        /// The character identifier that did not resolve.
        character_id: Uuid,
    },

    /// A roster lists the same character more than once.
    #[error("character {character_id} appears more than once in the roster")]
    DuplicateParticipant {
        /// The repeated character identifier.
        character_id: Uuid,
    },

    /// The character already participates in the encounter.
    #[error("character {character_id} is already a member of encounter {encounter_id}")]
    AlreadyMember {
        /// The encounter being added to.
        encounter_id: Uuid,
        /// The character that is already present.
        character_id: Uuid,
    },

    /// The character is not in the catalog.
    #[error("unknown character: {0}")]
    UnknownCharacter(Uuid),

    /// An encounter was not found.
    #[error("encounter not found: {0}")]
    EncounterNotFound(Uuid),

    /// A participant was not found in the encounter.
    #[error("participant {participant_id} not found in encounter {encounter_id}")]
    ParticipantNotFound {
        /// The encounter searched.
        encounter_id: Uuid,
        /// The missing participant.
        participant_id: Uuid,
    },

    /// A delegated write to the command layer failed.
    #[error("external command failed: {0}")]
    ExternalCommand(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_reference_message_names_both_ids() {
        let participant_id = Uuid::from_u128(7);
        let character_id = Uuid::from_u128(9);

        let message = DomainError::DanglingReference {
            participant_id,
            character_id,
        }
        .to_string();

        assert!(message.contains(&participant_id.to_string()));
        assert!(message.contains(&character_id.to_string()));
    }

    #[test]
    fn test_external_command_message_wraps_cause() {
        let message = DomainError::ExternalCommand("database is locked".into()).to_string();

        assert_eq!(message, "external command failed: database is locked");
    }
}
