//! DM Companion API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dm_companion_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Database connection or schema error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            DomainError::DanglingReference { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "dangling_reference")
            }
            DomainError::DuplicateParticipant { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "duplicate_participant")
            }
            DomainError::AlreadyMember { .. } => (StatusCode::CONFLICT, "already_member"),
            DomainError::UnknownCharacter(_) => (StatusCode::NOT_FOUND, "unknown_character"),
            DomainError::EncounterNotFound(_) => (StatusCode::NOT_FOUND, "encounter_not_found"),
            DomainError::ParticipantNotFound { .. } => {
                (StatusCode::NOT_FOUND, "participant_not_found")
            }
            DomainError::ExternalCommand(_) => (StatusCode::BAD_GATEWAY, "external_command_error"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
