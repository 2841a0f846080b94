//! `SQLite` implementation of the repository traits.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;
use uuid::Uuid;

use dm_companion_core::error::DomainError;
use dm_companion_core::records::{Character, Encounter, EncounterCharacter, EncounterDetail};
use dm_companion_core::repository::{CharacterRepository, EncounterRepository};

use crate::schema::SCHEMA;

const MAX_CONNECTIONS: u32 = 5;

/// SQLite-backed character and encounter store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if missing) the database at `url` and ensures the
    /// schema exists.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the URL is invalid, the database cannot be
    /// opened, or the schema cannot be created.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds a single connection that never expires, since every
    /// `SQLite` in-memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the schema cannot be created.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(Option::<Duration>::None)
            .max_lifetime(Option::<Duration>::None)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        debug!("store schema ready");
        Ok(Self { pool })
    }

    async fn encounter_exists(&self, encounter_id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM encounters WHERE id = ?1")
            .bind(encounter_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(row.is_some())
    }

    async fn is_member(&self, encounter_id: Uuid, character_id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query(
            "SELECT 1 FROM encounter_characters WHERE encounter_id = ?1 AND character_id = ?2",
        )
        .bind(encounter_id.to_string())
        .bind(character_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(row.is_some())
    }

    async fn load_participant(
        &self,
        encounter_id: Uuid,
        participant_id: Uuid,
    ) -> Result<Option<EncounterCharacter>, DomainError> {
        sqlx::query(
            "SELECT id, character_id, initiative, current_hit_points, hit_points \
             FROM encounter_characters WHERE encounter_id = ?1 AND id = ?2",
        )
        .bind(encounter_id.to_string())
        .bind(participant_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?
        .as_ref()
        .map(participant_from_row)
        .transpose()
    }
}

fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(err.to_string())
}

fn uuid_column(row: &SqliteRow, column: &str) -> Result<Uuid, DomainError> {
    let raw: String = row.try_get(column).map_err(infrastructure)?;
    Uuid::parse_str(&raw)
        .map_err(|e| DomainError::Infrastructure(format!("invalid uuid in {column}: {e}")))
}

fn character_from_row(row: &SqliteRow) -> Result<Character, DomainError> {
    Ok(Character {
        id: uuid_column(row, "id")?,
        name: row.try_get("name").map_err(infrastructure)?,
        class: row.try_get("class").map_err(infrastructure)?,
        race: row.try_get("race").map_err(infrastructure)?,
        background: row.try_get("background").map_err(infrastructure)?,
        level: row.try_get("level").map_err(infrastructure)?,
        experience: row.try_get("experience").map_err(infrastructure)?,
        hit_points: row.try_get("hit_points").map_err(infrastructure)?,
        armor_class: row.try_get("armor_class").map_err(infrastructure)?,
        notes: row.try_get("notes").map_err(infrastructure)?,
        created_at: row.try_get("created_at").map_err(infrastructure)?,
    })
}

fn encounter_from_row(row: &SqliteRow) -> Result<Encounter, DomainError> {
    Ok(Encounter {
        id: uuid_column(row, "id")?,
        title: row.try_get("title").map_err(infrastructure)?,
        created_at: row.try_get("created_at").map_err(infrastructure)?,
    })
}

fn participant_from_row(row: &SqliteRow) -> Result<EncounterCharacter, DomainError> {
    Ok(EncounterCharacter {
        id: uuid_column(row, "id")?,
        character_id: uuid_column(row, "character_id")?,
        initiative: row.try_get("initiative").map_err(infrastructure)?,
        current_hit_points: row.try_get("current_hit_points").map_err(infrastructure)?,
        hit_points: row.try_get("hit_points").map_err(infrastructure)?,
    })
}

#[async_trait]
impl CharacterRepository for SqliteStore {
    async fn list_characters(&self) -> Result<Vec<Character>, DomainError> {
        sqlx::query(
            "SELECT id, name, class, race, background, level, experience, hit_points, \
             armor_class, notes, created_at FROM characters ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?
        .iter()
        .map(character_from_row)
        .collect()
    }

    async fn create_character(&self, character: &Character) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO characters (id, name, class, race, background, level, experience, \
             hit_points, armor_class, notes, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(&character.class)
        .bind(&character.race)
        .bind(&character.background)
        .bind(character.level)
        .bind(character.experience)
        .bind(character.hit_points)
        .bind(character.armor_class)
        .bind(&character.notes)
        .bind(character.created_at)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;
        Ok(())
    }
}

#[async_trait]
impl EncounterRepository for SqliteStore {
    async fn list_encounters(&self) -> Result<Vec<Encounter>, DomainError> {
        sqlx::query("SELECT id, title, created_at FROM encounters ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?
            .iter()
            .map(encounter_from_row)
            .collect()
    }

    async fn create_encounter(&self, encounter: &Encounter) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO encounters (id, title, created_at) VALUES (?1, ?2, ?3)")
            .bind(encounter.id.to_string())
            .bind(&encounter.title)
            .bind(encounter.created_at)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }

    async fn load_encounter(&self, encounter_id: Uuid) -> Result<EncounterDetail, DomainError> {
        let encounter = sqlx::query("SELECT id, title, created_at FROM encounters WHERE id = ?1")
            .bind(encounter_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?
            .as_ref()
            .map(encounter_from_row)
            .transpose()?
            .ok_or(DomainError::EncounterNotFound(encounter_id))?;

        let participants = sqlx::query(
            "SELECT id, character_id, initiative, current_hit_points, hit_points \
             FROM encounter_characters WHERE encounter_id = ?1 ORDER BY seq",
        )
        .bind(encounter_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure)?
        .iter()
        .map(participant_from_row)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(EncounterDetail {
            encounter,
            participants,
        })
    }

    async fn add_participant(
        &self,
        encounter_id: Uuid,
        participant: &EncounterCharacter,
    ) -> Result<EncounterCharacter, DomainError> {
        if !self.encounter_exists(encounter_id).await? {
            return Err(DomainError::EncounterNotFound(encounter_id));
        }

        let inserted = sqlx::query(
            "INSERT INTO encounter_characters \
             (id, encounter_id, character_id, initiative, current_hit_points, hit_points) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(participant.id.to_string())
        .bind(encounter_id.to_string())
        .bind(participant.character_id.to_string())
        .bind(participant.initiative)
        .bind(participant.current_hit_points)
        .bind(participant.hit_points)
        .execute(&self.pool)
        .await;

        match inserted {
            Ok(_) => Ok(participant.clone()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                if self.is_member(encounter_id, participant.character_id).await? {
                    Err(DomainError::AlreadyMember {
                        encounter_id,
                        character_id: participant.character_id,
                    })
                } else {
                    Err(DomainError::Infrastructure(db_err.to_string()))
                }
            }
            Err(err) => Err(infrastructure(err)),
        }
    }

    async fn update_participant(
        &self,
        encounter_id: Uuid,
        participant_id: Uuid,
        initiative: Option<i32>,
        current_hit_points: i32,
    ) -> Result<EncounterCharacter, DomainError> {
        let result = sqlx::query(
            "UPDATE encounter_characters SET initiative = ?1, current_hit_points = ?2 \
             WHERE encounter_id = ?3 AND id = ?4",
        )
        .bind(initiative)
        .bind(current_hit_points)
        .bind(encounter_id.to_string())
        .bind(participant_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        if result.rows_affected() == 0 && !self.encounter_exists(encounter_id).await? {
            return Err(DomainError::EncounterNotFound(encounter_id));
        }

        self.load_participant(encounter_id, participant_id)
            .await?
            .ok_or(DomainError::ParticipantNotFound {
                encounter_id,
                participant_id,
            })
    }
}
