//! Routes for the Encounter context.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use dm_companion_core::command::Command;
use dm_companion_core::records::{Character, Encounter};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use dm_companion_encounter::application::query_handlers::EncounterDetailView;
use dm_companion_encounter::application::{command_handlers, query_handlers};
use dm_companion_encounter::domain::commands;

use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;

/// Request body for POST /create.
#[derive(Debug, Deserialize)]
pub struct CreateEncounterRequest {
    /// The encounter title.
    pub title: String,
}

/// Request body for POST /add-character.
#[derive(Debug, Deserialize)]
pub struct AddCharacterRequest {
    /// The encounter to join.
    pub encounter_id: Uuid,
    /// The catalog character joining it.
    pub character_id: Uuid,
}

/// Request body for POST /update-combat-state.
#[derive(Debug, Deserialize)]
pub struct UpdateCombatStateRequest {
    /// The encounter containing the participant.
    pub encounter_id: Uuid,
    /// The participant to update.
    pub participant_id: Uuid,
    /// Rolled initiative, or `null` to clear it.
    pub initiative: Option<i32>,
    /// Current hit points.
    pub current_hit_points: i32,
}

/// POST /create
#[instrument(skip(state, request))]
async fn create_encounter(
    State(state): State<AppState>,
    Json(request): Json<CreateEncounterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CreateEncounter {
        correlation_id: Uuid::new_v4(),
        encounter_id: Uuid::new_v4(),
        title: request.title,
    };

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling create_encounter command"
    );

    let event = command_handlers::handle_create_encounter(
        &command,
        state.clock.as_ref(),
        &*state.encounters,
    )
    .await?;

    Ok(Json(CommandResponse {
        id: command.encounter_id,
        event_ids: vec![event.metadata.event_id],
    }))
}

/// POST /add-character
#[instrument(
    skip(state, request),
    fields(encounter_id = %request.encounter_id, character_id = %request.character_id)
)]
async fn add_character(
    State(state): State<AppState>,
    Json(request): Json<AddCharacterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::AddCharacterToEncounter {
        correlation_id: Uuid::new_v4(),
        encounter_id: request.encounter_id,
        participant_id: Uuid::new_v4(),
        character_id: request.character_id,
    };

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling add_character_to_encounter command"
    );

    let event = command_handlers::handle_add_character_to_encounter(
        &command,
        state.clock.as_ref(),
        &*state.characters,
        &*state.encounters,
    )
    .await?;

    Ok(Json(CommandResponse {
        id: command.participant_id,
        event_ids: vec![event.metadata.event_id],
    }))
}

/// POST /update-combat-state
#[instrument(
    skip(state, request),
    fields(encounter_id = %request.encounter_id, participant_id = %request.participant_id)
)]
async fn update_combat_state(
    State(state): State<AppState>,
    Json(request): Json<UpdateCombatStateRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::UpdateCombatState {
        correlation_id: Uuid::new_v4(),
        encounter_id: request.encounter_id,
        participant_id: request.participant_id,
        initiative: request.initiative,
        current_hit_points: request.current_hit_points,
    };

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling update_combat_state command"
    );

    let event = command_handlers::handle_update_combat_state(
        &command,
        state.clock.as_ref(),
        &*state.encounters,
    )
    .await?;

    Ok(Json(CommandResponse {
        id: command.participant_id,
        event_ids: vec![event.metadata.event_id],
    }))
}

/// GET /
#[instrument(skip(state))]
async fn list_encounters(State(state): State<AppState>) -> Result<Json<Vec<Encounter>>, ApiError> {
    let encounters = query_handlers::list_encounters(&*state.encounters).await?;
    Ok(Json(encounters))
}

/// GET /{encounter_id}
#[instrument(skip(state))]
async fn get_encounter(
    State(state): State<AppState>,
    Path(encounter_id): Path<Uuid>,
) -> Result<Json<EncounterDetailView>, ApiError> {
    let view =
        query_handlers::get_encounter_detail(encounter_id, &*state.characters, &*state.encounters)
            .await?;
    Ok(Json(view))
}

/// GET /{encounter_id}/eligible-characters
#[instrument(skip(state))]
async fn eligible_characters(
    State(state): State<AppState>,
    Path(encounter_id): Path<Uuid>,
) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = query_handlers::list_eligible_characters(
        encounter_id,
        &*state.characters,
        &*state.encounters,
    )
    .await?;
    Ok(Json(characters))
}

/// Returns the router for the encounter context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_encounters))
        .route("/create", post(create_encounter))
        .route("/add-character", post(add_character))
        .route("/update-combat-state", post(update_combat_state))
        .route("/{encounter_id}", get(get_encounter))
        .route("/{encounter_id}/eligible-characters", get(eligible_characters))
}
