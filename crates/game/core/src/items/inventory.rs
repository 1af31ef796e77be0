//! Ordered item storage owned by the player.

use super::item::{Item, Potion};
use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory is full ({limit} items)")]
    Full { limit: usize },

    #[error("no item at slot {index}")]
    NoSuchSlot { index: usize },

    #[error("item at slot {index} is not {expected}")]
    WrongKind { index: usize, expected: &'static str },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. } => ErrorSeverity::Recoverable,
            Self::NoSuchSlot { .. } | Self::WrongKind { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "INVENTORY_FULL",
            Self::NoSuchSlot { .. } => "INVENTORY_NO_SUCH_SLOT",
            Self::WrongKind { .. } => "INVENTORY_WRONG_KIND",
        }
    }
}

/// Items not currently worn. An optional limit comes from the difficulty mode.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: Vec<Item>,
    limit: Option<usize>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Change the limit. Items already held above the new limit are kept.
    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.items.len() >= limit)
    }

    /// # Errors
    ///
    /// Returns [`InventoryError::Full`] together with the rejected item.
    pub fn add(&mut self, item: impl Into<Item>) -> Result<(), (InventoryError, Item)> {
        let item = item.into();
        if let Some(limit) = self.limit
            && self.items.len() >= limit
        {
            return Err((InventoryError::Full { limit }, item));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Item, InventoryError> {
        if index >= self.items.len() {
            return Err(InventoryError::NoSuchSlot { index });
        }
        Ok(self.items.remove(index))
    }

    /// Put an item back where it was removed from, ignoring the limit.
    pub(crate) fn reinsert(&mut self, index: usize, item: Item) {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Inventory indices of every potion, in order.
    pub fn potion_slots(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_potion())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn potions(&self) -> impl Iterator<Item = &Potion> {
        self.items.iter().filter_map(|item| match item {
            Item::Potion(potion) => Some(potion),
            _ => None,
        })
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name() == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove and return every item.
    pub fn drain(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::PotionEffect;

    fn potion(name: &str) -> Potion {
        Potion::new(name, PotionEffect::Heal, 10.0)
    }

    #[test]
    fn limit_rejects_and_returns_item() {
        let mut inventory = Inventory::with_limit(Some(1));
        assert!(inventory.add(potion("a")).is_ok());
        let (err, item) = inventory.add(potion("b")).unwrap_err();
        assert_eq!(err, InventoryError::Full { limit: 1 });
        assert_eq!(item.name(), "b");
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn remove_out_of_range_is_validation_error() {
        let mut inventory = Inventory::new();
        let err = inventory.remove(3).unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn potion_slots_skip_other_items() {
        let mut inventory = Inventory::new();
        inventory
            .add(crate::items::Gear::new("Ring", crate::items::GearKind::Ring))
            .unwrap();
        inventory.add(potion("p")).unwrap();
        assert_eq!(inventory.potion_slots(), vec![1]);
        assert_eq!(inventory.potions().count(), 1);
    }
}
