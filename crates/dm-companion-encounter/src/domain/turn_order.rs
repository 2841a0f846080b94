//! Turn order derivation.
//!
//! The order is never stored. It is recomputed from each snapshot's
//! initiative and hit points, so it cannot drift from the combat state.

use dm_companion_core::records::{Character, EncounterCharacter};
use serde::Serialize;
use uuid::Uuid;

use super::roster::Roster;

/// Whether a participant can still fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatStatus {
    /// Above zero hit points.
    Alive,
    /// At or below zero hit points.
    Defeated,
}

/// One row of the facilitator-facing turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnEntry {
    /// The participation identifier.
    pub participant_id: Uuid,
    /// The participating character.
    pub character_id: Uuid,
    /// The character's name.
    pub display_name: String,
    /// Rolled initiative, if any.
    pub initiative: Option<i32>,
    /// Alive or defeated.
    pub status: CombatStatus,
    /// Current hit points.
    pub current_hit_points: i32,
    /// Maximum hit points.
    pub hit_points: i32,
}

impl TurnEntry {
    fn new(participant: &EncounterCharacter, character: &Character) -> Self {
        Self {
            participant_id: participant.id,
            character_id: participant.character_id,
            display_name: character.name.clone(),
            initiative: participant.initiative,
            status: if participant.is_defeated() {
                CombatStatus::Defeated
            } else {
                CombatStatus::Alive
            },
            current_hit_points: participant.current_hit_points,
            hit_points: participant.hit_points,
        }
    }
}

/// Orders the roster for play.
///
/// Participants with initiative come first, highest initiative first, ties
/// broken by character id ascending. Participants without initiative follow
/// in roster order. Defeated participants keep their place.
#[must_use]
pub fn compute_turn_order(roster: &Roster) -> Vec<TurnEntry> {
    let (mut ranked, unranked): (Vec<_>, Vec<_>) = roster
        .iter()
        .partition(|(participant, _)| participant.initiative.is_some());

    ranked.sort_by(|(a, _), (b, _)| {
        b.initiative
            .cmp(&a.initiative)
            .then_with(|| a.character_id.cmp(&b.character_id))
    });

    ranked
        .into_iter()
        .chain(unranked)
        .map(|(participant, character)| TurnEntry::new(participant, character))
        .collect()
}
