//! Commands for the Character Catalog context.

use dm_companion_core::command::Command;
use uuid::Uuid;

/// Command to create a new character.
#[derive(Debug, Clone)]
pub struct CreateCharacter {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The identifier to assign to the new character.
    pub character_id: Uuid,
    /// The character's name.
    pub name: String,
    /// The character's class.
    pub class: String,
    /// The character's race.
    pub race: String,
    /// Optional background.
    pub background: Option<String>,
    /// Starting level.
    pub level: i32,
    /// Starting experience.
    pub experience: i32,
    /// Maximum hit points.
    pub hit_points: i32,
    /// Armor class.
    pub armor_class: i32,
    /// Free-text notes.
    pub notes: String,
}

impl Command for CreateCharacter {
    fn command_type(&self) -> &'static str {
        "character.create_character"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
