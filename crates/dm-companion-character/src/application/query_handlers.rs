//! Query handlers for the Character Catalog context.

use dm_companion_core::error::DomainError;
use dm_companion_core::records::Character;
use dm_companion_core::repository::CharacterRepository;

/// Returns the full character catalog in creation order.
///
/// # Errors
///
/// Returns the repository's error if the catalog cannot be loaded.
pub async fn list_characters(
    repo: &dyn CharacterRepository,
) -> Result<Vec<Character>, DomainError> {
    repo.list_characters().await
}
