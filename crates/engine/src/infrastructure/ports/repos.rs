//! Repository port traits for character storage.

use async_trait::async_trait;
use pathsheet_domain::{Character, CharacterId};

use super::error::RepoError;

// =============================================================================
// Character Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    /// Returns whether a character was removed.
    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError>;
    /// All stored characters, oldest first.
    async fn list(&self) -> Result<Vec<Character>, RepoError>;
}
