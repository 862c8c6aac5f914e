//! Character sheet use cases.
//!
//! Every edit follows the same path: load the character, apply the raw
//! choice updates, rerun the recalculation pipeline, store the fresh
//! snapshot on the character and persist it.

mod error;

pub use error::CharacterSheetError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pathsheet_domain::feats::{daily_limit, eligible_feats, has_feat};
use pathsheet_domain::ruleset::FeatData;
use pathsheet_domain::{
    Character, CharacterId, CharacterName, ChoiceUpdate, FeatCategory, NoteLevel, RecalcNote,
    Recalculator, Ruleset,
};
use serde::Serialize;

use crate::infrastructure::ports::{CharacterRepo, ClockPort};

// =============================================================================
// Result Types
// =============================================================================

/// A character with a freshly derived sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetResult {
    pub character: Character,
    /// Inputs the pipeline skipped or adjusted.
    pub notes: Vec<RecalcNote>,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub level: u8,
    pub ancestry_id: Option<String>,
    pub class_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Character> for CharacterSummary {
    fn from(character: &Character) -> Self {
        Self {
            id: character.id(),
            name: character.name().to_string(),
            level: character.level(),
            ancestry_id: character.choices().ancestry_id.clone(),
            class_id: character.choices().class_id.clone(),
            updated_at: character.updated_at(),
        }
    }
}

/// Result of spending a daily use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUseResult {
    pub feat_id: String,
    pub remaining: u32,
    pub max: u32,
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for character sheet use cases.
pub struct CharacterSheetUseCases {
    character_repo: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
    ruleset: Arc<Ruleset>,
}

impl CharacterSheetUseCases {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        ruleset: Arc<Ruleset>,
    ) -> Self {
        Self {
            character_repo,
            clock,
            ruleset,
        }
    }

    /// Create and store a new level 1 (or `level`) character with no choices.
    pub async fn create_character(
        &self,
        name: String,
        level: Option<u8>,
    ) -> Result<SheetResult, CharacterSheetError> {
        let name = CharacterName::new(name)?;
        let mut character = Character::new(name, self.clock.now());
        if let Some(level) = level {
            character = character.with_level(level)?;
        }

        let notes = self.refresh(&mut character);
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %character.id(),
            name = %character.name(),
            level = character.level(),
            "Created character"
        );

        Ok(SheetResult { character, notes })
    }

    pub async fn list_characters(&self) -> Result<Vec<CharacterSummary>, CharacterSheetError> {
        let characters = self.character_repo.list().await?;
        Ok(characters.iter().map(CharacterSummary::from).collect())
    }

    /// Load a character and derive its sheet against the current ruleset.
    ///
    /// Nothing is written back; a stale stored snapshot is replaced only in
    /// the returned copy.
    pub async fn get_sheet(&self, id: CharacterId) -> Result<SheetResult, CharacterSheetError> {
        let mut character = self.load(id).await?;
        let notes = self.refresh(&mut character);
        Ok(SheetResult { character, notes })
    }

    /// Apply a batch of choice updates, recalculate and persist.
    ///
    /// The batch is all-or-nothing: the first rejected update aborts it and
    /// nothing is saved.
    pub async fn apply_choices(
        &self,
        id: CharacterId,
        updates: Vec<ChoiceUpdate>,
    ) -> Result<SheetResult, CharacterSheetError> {
        let mut character = self.load(id).await?;
        let now = self.clock.now();
        let count = updates.len();

        for update in updates {
            character
                .apply(update, &self.ruleset, now)
                .inspect_err(|e| {
                    tracing::debug!(character_id = %id, error = %e, "Rejected choice update")
                })?;
        }

        let notes = self.refresh(&mut character);
        self.character_repo.save(&character).await?;

        tracing::debug!(
            character_id = %id,
            updates = count,
            notes = notes.len(),
            "Applied character choices"
        );

        Ok(SheetResult { character, notes })
    }

    /// Rerun the pipeline and persist the snapshot without changing choices.
    pub async fn recalculate(&self, id: CharacterId) -> Result<SheetResult, CharacterSheetError> {
        let mut character = self.load(id).await?;
        let notes = self.refresh(&mut character);
        character.touch(self.clock.now());
        self.character_repo.save(&character).await?;
        Ok(SheetResult { character, notes })
    }

    /// Feats the character could take right now, optionally of one category.
    pub async fn eligible_feats(
        &self,
        id: CharacterId,
        category: Option<FeatCategory>,
    ) -> Result<Vec<FeatData>, CharacterSheetError> {
        let character = self.load(id).await?;
        let snapshot = Recalculator::new(&self.ruleset)
            .recalculate(&character)
            .snapshot;

        Ok(eligible_feats(&character, &snapshot, &self.ruleset, category)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Spend one daily use of a feat the character has.
    pub async fn use_daily_ability(
        &self,
        id: CharacterId,
        feat_id: &str,
    ) -> Result<DailyUseResult, CharacterSheetError> {
        let max = daily_limit(feat_id)
            .ok_or_else(|| CharacterSheetError::NotDailyLimited(feat_id.to_string()))?;
        let mut character = self.load(id).await?;
        if !has_feat(&character, &self.ruleset, feat_id) {
            return Err(CharacterSheetError::FeatNotTaken(feat_id.to_string()));
        }

        let remaining = character.daily_mut().use_once(feat_id, max)?;
        character.touch(self.clock.now());
        self.character_repo.save(&character).await?;

        tracing::info!(
            character_id = %id,
            feat_id = %feat_id,
            remaining,
            "Used daily ability"
        );

        Ok(DailyUseResult {
            feat_id: feat_id.to_string(),
            remaining,
            max,
        })
    }

    /// Daily preparations: every daily use comes back.
    pub async fn daily_preparations(
        &self,
        id: CharacterId,
    ) -> Result<Character, CharacterSheetError> {
        let mut character = self.load(id).await?;
        let now = self.clock.now();
        character.daily_mut().reset(now);
        character.touch(now);
        self.character_repo.save(&character).await?;

        tracing::info!(character_id = %id, "Completed daily preparations");
        Ok(character)
    }

    pub async fn delete_character(&self, id: CharacterId) -> Result<(), CharacterSheetError> {
        if !self.character_repo.delete(id).await? {
            return Err(CharacterSheetError::CharacterNotFound(id));
        }
        tracing::info!(character_id = %id, "Deleted character");
        Ok(())
    }

    async fn load(&self, id: CharacterId) -> Result<Character, CharacterSheetError> {
        self.character_repo
            .get(id)
            .await?
            .ok_or(CharacterSheetError::CharacterNotFound(id))
    }

    /// Recalculate, store the snapshot on the character and log the notes.
    fn refresh(&self, character: &mut Character) -> Vec<RecalcNote> {
        let result = Recalculator::new(&self.ruleset).recalculate(character);
        for note in &result.notes {
            match note.level {
                NoteLevel::Warning => {
                    tracing::warn!(character_id = %character.id(), step = %note.step, "{}", note.message)
                }
                NoteLevel::Info => {
                    tracing::debug!(character_id = %character.id(), step = %note.step, "{}", note.message)
                }
            }
        }
        character.set_derived(result.snapshot);
        result.notes
    }
}
