//! Route modules organized by bounded context.

pub mod character;
pub mod encounter;
pub mod health;

use serde::Serialize;
use uuid::Uuid;

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The created or affected record.
    pub id: Uuid,
    /// IDs of the domain events produced.
    pub event_ids: Vec<Uuid>,
}
