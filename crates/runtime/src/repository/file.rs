//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use dungeon_core::Player;

use super::{RepositoryError, Result, SaveRepository, validate_slot};

/// Stores each slot as pretty-printed JSON under `base_dir`.
///
/// Writes go to `<slot>.json.tmp` first and are renamed into place, so a
/// crash mid-save leaves the previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository rooted at `base_dir`, creating the directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.json"))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, player: &Player) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(player)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved {} to {}", player.name(), path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<Player>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let player: Player =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::CorruptedData {
                slot: slot.to_owned(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Loaded {} from {}", player.name(), path.display());
        Ok(Some(player))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted save {}", slot);
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
            {
                slots.push(slot.to_owned());
            }
        }
        slots.sort_unstable();
        Ok(slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::StatName;
    use tempfile::TempDir;

    fn repo() -> (TempDir, FileSaveRepository) {
        let dir = TempDir::new().unwrap();
        let repo = FileSaveRepository::new(dir.path().join("saves")).unwrap();
        (dir, repo)
    }

    #[test]
    fn save_then_load_restores_the_player() {
        let (_dir, repo) = repo();
        let mut player = Player::new("Ayla");
        player.gold = 321;
        player.dungeon_level = 4;
        player.entity.take_damage(25.0);

        repo.save("ayla", &player).unwrap();
        let loaded = repo.load("ayla").unwrap().unwrap();

        assert_eq!(loaded, player);
        assert_eq!(loaded.stat(StatName::Hp), 75.0);
        assert!(!repo.base_dir().join("ayla.json.tmp").exists());
    }

    #[test]
    fn missing_slot_is_none() {
        let (_dir, repo) = repo();
        assert!(repo.load("nobody").unwrap().is_none());
        assert!(!repo.exists("nobody"));
    }

    #[test]
    fn overwrite_replaces_the_whole_file() {
        let (_dir, repo) = repo();
        let mut player = Player::new("Ayla");
        repo.save("ayla", &player).unwrap();
        player.gold = 1;
        repo.save("ayla", &player).unwrap();

        assert_eq!(repo.load("ayla").unwrap().unwrap().gold, 1);
        assert_eq!(repo.list_slots().unwrap(), vec!["ayla".to_owned()]);
    }

    #[test]
    fn corrupt_save_degrades_to_a_fresh_player() {
        let (_dir, repo) = repo();
        fs::write(repo.base_dir().join("ayla.json"), b"{ not json").unwrap();

        assert!(matches!(
            repo.load("ayla"),
            Err(RepositoryError::CorruptedData { .. })
        ));
        let player = repo.load_or_default("ayla", || Player::new("Ayla"));
        assert_eq!(player.level, 1);
        assert_eq!(player.gold, 50);
    }

    #[test]
    fn slot_names_cannot_escape_the_directory() {
        let (_dir, repo) = repo();
        let player = Player::new("Ayla");

        assert!(matches!(
            repo.save("../evil", &player),
            Err(RepositoryError::InvalidSlot(_))
        ));
        assert!(repo.save("", &player).is_err());
    }

    #[test]
    fn delete_and_list() {
        let (_dir, repo) = repo();
        let player = Player::new("Ayla");
        repo.save("b-slot", &player).unwrap();
        repo.save("a_slot", &player).unwrap();

        assert_eq!(repo.list_slots().unwrap(), vec!["a_slot", "b-slot"]);
        repo.delete("a_slot").unwrap();
        repo.delete("a_slot").unwrap();
        assert_eq!(repo.list_slots().unwrap(), vec!["b-slot"]);
    }
}
