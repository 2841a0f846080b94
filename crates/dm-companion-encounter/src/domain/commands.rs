//! Commands for the Encounter context.

use dm_companion_core::command::Command;
use uuid::Uuid;

/// Command to create a new encounter.
#[derive(Debug, Clone)]
pub struct CreateEncounter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The identifier to assign to the new encounter.
    pub encounter_id: Uuid,
    /// The encounter title.
    pub title: String,
}

impl Command for CreateEncounter {
    fn command_type(&self) -> &'static str {
        "encounter.create_encounter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a character from the catalog to an encounter.
#[derive(Debug, Clone)]
pub struct AddCharacterToEncounter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The encounter to add to.
    pub encounter_id: Uuid,
    /// The identifier to assign to the new participation.
    pub participant_id: Uuid,
    /// The character joining.
    pub character_id: Uuid,
}

impl Command for AddCharacterToEncounter {
    fn command_type(&self) -> &'static str {
        "encounter.add_character_to_encounter"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to record a participant's rolled initiative and current hit
/// points.
#[derive(Debug, Clone)]
pub struct UpdateCombatState {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The encounter the participant belongs to.
    pub encounter_id: Uuid,
    /// The participant to update.
    pub participant_id: Uuid,
    /// Rolled initiative, or `None` to clear it.
    pub initiative: Option<i32>,
    /// Current hit points.
    pub current_hit_points: i32,
}

impl Command for UpdateCombatState {
    fn command_type(&self) -> &'static str {
        "encounter.update_combat_state"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
