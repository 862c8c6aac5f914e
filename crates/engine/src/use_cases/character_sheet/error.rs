//! Character sheet operation errors.

use crate::infrastructure::ports::RepoError;
use pathsheet_domain::{CharacterId, DomainError};

/// Errors that can occur during character sheet operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterSheetError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Feat not taken: {0}")]
    FeatNotTaken(String),

    #[error("Feat has no daily uses: {0}")]
    NotDailyLimited(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
