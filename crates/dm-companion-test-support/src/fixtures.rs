//! Record builders with sensible defaults.

use chrono::{TimeZone, Utc};
use dm_companion_core::records::{Character, Encounter, EncounterCharacter};
use uuid::Uuid;

/// A level 1 character with the given id, name, and maximum hit points.
///
/// # Panics
///
/// Never in practice; the fixed timestamp is a valid date.
#[must_use]
pub fn character(id: Uuid, name: &str, hit_points: i32) -> Character {
    Character {
        id,
        name: name.to_owned(),
        class: "Fighter".to_owned(),
        race: "Human".to_owned(),
        background: None,
        level: 1,
        experience: 0,
        hit_points,
        armor_class: 14,
        notes: String::new(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    }
}

/// An encounter with the given id and title.
///
/// # Panics
///
/// Never in practice; the fixed timestamp is a valid date.
#[must_use]
pub fn encounter(id: Uuid, title: &str) -> Encounter {
    Encounter {
        id,
        title: title.to_owned(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    }
}

/// A participant for `character_id` with a fresh participation id.
#[must_use]
pub fn participant(
    character_id: Uuid,
    initiative: Option<i32>,
    current_hit_points: i32,
    hit_points: i32,
) -> EncounterCharacter {
    EncounterCharacter {
        id: Uuid::new_v4(),
        character_id,
        initiative,
        current_hit_points,
        hit_points,
    }
}
