//! Record types exchanged with the command layer.
//!
//! These are the already-decoded shapes the repositories hand back. Nothing
//! here owns another record: participants point at characters by id only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable combat participant template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Character class (e.g. "Fighter").
    pub class: String,
    /// Character race (e.g. "Dwarf").
    pub race: String,
    /// Optional background.
    pub background: Option<String>,
    /// Character level.
    pub level: i32,
    /// Accumulated experience points.
    pub experience: i32,
    /// Maximum hit points.
    pub hit_points: i32,
    /// Armor class.
    pub armor_class: i32,
    /// Free-text notes.
    pub notes: String,
    /// When the character was created.
    pub created_at: DateTime<Utc>,
}

/// A named combat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// Encounter identifier.
    pub id: Uuid,
    /// Encounter title.
    pub title: String,
    /// When the encounter was created.
    pub created_at: DateTime<Utc>,
}

/// One character's combat state within one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterCharacter {
    /// Participation identifier.
    pub id: Uuid,
    /// Weak reference to the participating character.
    pub character_id: Uuid,
    /// Rolled initiative; `None` until rolled.
    pub initiative: Option<i32>,
    /// Current hit points; zero or below means defeated.
    pub current_hit_points: i32,
    /// Maximum hit points, copied from the character when it joined.
    pub hit_points: i32,
}

impl EncounterCharacter {
    /// Returns `true` when the participant is at or below zero hit points.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.current_hit_points <= 0
    }
}

/// An encounter together with its participants, in join order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterDetail {
    /// The encounter.
    pub encounter: Encounter,
    /// Its participants.
    pub participants: Vec<EncounterCharacter>,
}
