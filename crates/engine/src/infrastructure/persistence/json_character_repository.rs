//! File-based CharacterRepo implementation.
//!
//! Each character is stored as `<id>.json` (pretty-printed) in the data
//! directory. Writes go to a temporary file first and are renamed into
//! place, so a crash never leaves a half-written character behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pathsheet_domain::{Character, CharacterId};
use tokio::fs;

use crate::infrastructure::ports::{CharacterRepo, RepoError};

pub struct JsonCharacterRepository {
    base_dir: PathBuf,
}

impl JsonCharacterRepository {
    /// Open the store, creating the directory if needed.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepoError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| RepoError::storage("create_dir", e))?;
        Ok(Self { base_dir })
    }

    fn character_path(&self, id: CharacterId) -> PathBuf {
        self.base_dir.join(format!("{}.json", id))
    }

    async fn read(&self, path: &Path) -> Result<Character, RepoError> {
        let bytes = fs::read(path)
            .await
            .map_err(|e| RepoError::storage("read", e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            RepoError::serialization(format!("{}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl CharacterRepo for JsonCharacterRepository {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let path = self.character_path(id);
        if !fs::try_exists(&path)
            .await
            .map_err(|e| RepoError::storage("get", e))?
        {
            return Ok(None);
        }

        let character = self.read(&path).await?;
        tracing::debug!(character_id = %id, "Loaded character");
        Ok(Some(character))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let path = self.character_path(character.id());
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(character).map_err(RepoError::serialization)?;
        fs::write(&temp_path, bytes)
            .await
            .map_err(|e| RepoError::storage("save", e))?;
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| RepoError::storage("save", e))?;

        tracing::debug!(character_id = %character.id(), path = %path.display(), "Saved character");
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<bool, RepoError> {
        match fs::remove_file(self.character_path(id)).await {
            Ok(()) => {
                tracing::debug!(character_id = %id, "Deleted character");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(RepoError::storage("delete", e)),
        }
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| RepoError::storage("list", e))?;

        let mut characters = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RepoError::storage("list", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match self.read(&path).await {
                Ok(character) => characters.push(character),
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable character file"),
            }
        }

        characters.sort_by_key(|c| c.created_at());
        Ok(characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pathsheet_domain::CharacterName;

    fn character(name: &str, secs: i64) -> Character {
        let now = Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap();
        Character::new(CharacterName::new(name).unwrap(), now)
    }

    #[tokio::test]
    async fn save_then_get_returns_the_character() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepository::new(dir.path()).await.unwrap();
        let amiri = character("Amiri", 0);

        repo.save(&amiri).await.unwrap();
        let loaded = repo.get(amiri.id()).await.unwrap();
        assert_eq!(loaded, Some(amiri.clone()));
        assert!(!dir.path().join(format!("{}.json.tmp", amiri.id())).exists());
    }

    #[tokio::test]
    async fn missing_character_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepository::new(dir.path()).await.unwrap();
        assert_eq!(repo.get(CharacterId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepository::new(dir.path()).await.unwrap();
        let ezren = character("Ezren", 0);
        repo.save(&ezren).await.unwrap();

        assert!(repo.delete(ezren.id()).await.unwrap());
        assert!(!repo.delete(ezren.id()).await.unwrap());
        assert_eq!(repo.get(ezren.id()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_is_ordered_and_skips_junk() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCharacterRepository::new(dir.path()).await.unwrap();
        let late = character("Seoni", 60);
        let early = character("Valeros", 0);
        repo.save(&late).await.unwrap();
        repo.save(&early).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a character").unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["Valeros", "Seoni"]);
    }

    #[tokio::test]
    async fn nested_data_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("characters");
        let repo = JsonCharacterRepository::new(&nested).await.unwrap();
        repo.save(&character("Kyra", 0)).await.unwrap();
        assert!(nested.is_dir());
    }
}
