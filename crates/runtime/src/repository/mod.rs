//! Save-game persistence.
//!
//! A save is the whole [`Player`], written between rooms. Slots are plain
//! names; the file backend maps each to `<slot>.json`.

mod error;
mod file;
mod memory;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;

use dungeon_core::Player;

/// Storage for player saves, keyed by slot name.
pub trait SaveRepository {
    fn save(&self, slot: &str, player: &Player) -> Result<()>;

    /// `Ok(None)` when the slot has never been written.
    fn load(&self, slot: &str) -> Result<Option<Player>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;

    /// Slot names in sorted order.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Load a slot, or start over when it is missing or unreadable.
    ///
    /// A corrupt save is logged and replaced by `fresh()`; it is not deleted,
    /// so the next [`save`](Self::save) overwrites it.
    fn load_or_default(&self, slot: &str, fresh: impl FnOnce() -> Player) -> Player
    where
        Self: Sized,
    {
        match self.load(slot) {
            Ok(Some(player)) => player,
            Ok(None) => {
                tracing::info!(slot, "no save found, starting fresh");
                fresh()
            }
            Err(err) => {
                tracing::warn!(slot, %err, "save unreadable, starting fresh");
                fresh()
            }
        }
    }
}

/// Slot names become file names, so keep them to a safe alphabet.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_owned()))
    }
}
