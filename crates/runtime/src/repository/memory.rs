//! In-memory SaveRepository implementation for tests and throwaway runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use dungeon_core::Player;

use super::{RepositoryError, Result, SaveRepository};

#[derive(Default)]
pub struct InMemorySaveRepository {
    saves: RwLock<BTreeMap<String, Player>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, player: &Player) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_owned(), player.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<Player>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(slot).cloned())
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().cloned().collect())
    }
}
