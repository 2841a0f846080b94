//! Routes for the Character Catalog context.

use axum::extract::State;
use axum::{Json, Router, routing::get, routing::post};
use dm_companion_core::command::Command;
use dm_companion_core::records::Character;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use dm_companion_character::application::{command_handlers, query_handlers};
use dm_companion_character::domain::commands;

use crate::error::ApiError;
use crate::routes::CommandResponse;
use crate::state::AppState;

fn default_level() -> i32 {
    1
}

fn default_armor_class() -> i32 {
    10
}

/// Request body for POST /create.
#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    /// The character's name.
    pub name: String,
    /// The character's class.
    pub class: String,
    /// The character's race.
    pub race: String,
    /// Optional background.
    #[serde(default)]
    pub background: Option<String>,
    /// Starting level; defaults to 1.
    #[serde(default = "default_level")]
    pub level: i32,
    /// Starting experience; defaults to 0.
    #[serde(default)]
    pub experience: i32,
    /// Maximum hit points.
    pub hit_points: i32,
    /// Armor class; defaults to 10.
    #[serde(default = "default_armor_class")]
    pub armor_class: i32,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

/// POST /create
#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_character(
    State(state): State<AppState>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::CreateCharacter {
        correlation_id: Uuid::new_v4(),
        character_id: Uuid::new_v4(),
        name: request.name,
        class: request.class,
        race: request.race,
        background: request.background,
        level: request.level,
        experience: request.experience,
        hit_points: request.hit_points,
        armor_class: request.armor_class,
        notes: request.notes,
    };

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id,
        "handling create_character command"
    );

    let event = command_handlers::handle_create_character(
        &command,
        state.clock.as_ref(),
        &*state.characters,
    )
    .await?;

    Ok(Json(CommandResponse {
        id: command.character_id,
        event_ids: vec![event.metadata.event_id],
    }))
}

/// GET /
#[instrument(skip(state))]
async fn list_characters(State(state): State<AppState>) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = query_handlers::list_characters(&*state.characters).await?;
    Ok(Json(characters))
}

/// Returns the router for the character catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_characters))
        .route("/create", post(create_character))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use dm_companion_core::clock::Clock;
    use dm_companion_core::repository::CharacterRepository;
    use dm_companion_test_support::{
        FailingCharacterRepository, FixedClock, InMemoryCharacterRepository,
        InMemoryEncounterRepository, character,
    };
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_state_with(characters: Arc<dyn CharacterRepository>) -> AppState {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ));
        AppState::new(
            clock,
            characters,
            Arc::new(InMemoryEncounterRepository::default()),
        )
    }

    fn post_request(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_character_returns_200_with_id_and_event_ids() {
        // Arrange
        let repo = Arc::new(InMemoryCharacterRepository::default());
        let app = router().with_state(app_state_with(repo.clone()));
        let body = serde_json::json!({
            "name": "Thorin",
            "class": "Fighter",
            "race": "Dwarf",
            "hit_points": 30
        });

        // Act
        let response = app.oneshot(post_request("/create", &body)).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["event_ids"].as_array().unwrap().len(), 1);

        let stored = repo.characters();
        assert_eq!(stored.len(), 1);
        assert_eq!(json["id"], stored[0].id.to_string());
        assert_eq!(stored[0].level, 1);
        assert_eq!(stored[0].armor_class, 10);
    }

    #[tokio::test]
    async fn test_create_character_with_blank_name_returns_400() {
        let app = router().with_state(app_state_with(Arc::new(
            InMemoryCharacterRepository::default(),
        )));
        let body = serde_json::json!({
            "name": "  ",
            "class": "Fighter",
            "race": "Dwarf",
            "hit_points": 30
        });

        let response = app.oneshot(post_request("/create", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_create_character_with_missing_field_returns_422() {
        let app = router().with_state(app_state_with(Arc::new(
            InMemoryCharacterRepository::default(),
        )));
        let body = serde_json::json!({ "name": "Thorin" });

        let response = app.oneshot(post_request("/create", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_list_characters_returns_catalog_in_order() {
        // Arrange
        let thorin = character(Uuid::new_v4(), "Thorin", 30);
        let elara = character(Uuid::new_v4(), "Elara", 22);
        let app = router().with_state(app_state_with(Arc::new(InMemoryCharacterRepository::new(
            vec![thorin.clone(), elara.clone()],
        ))));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Thorin", "Elara"]);
    }

    #[tokio::test]
    async fn test_list_characters_returns_500_on_repository_failure() {
        let app = router().with_state(app_state_with(Arc::new(FailingCharacterRepository)));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["error"], "infrastructure_error");
    }
}
