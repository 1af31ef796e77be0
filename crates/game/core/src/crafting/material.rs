//! Crafting materials and the player's stock of them.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};
use crate::items::{InventoryError, Rarity};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CraftError {
    #[error("not enough {material}: need {needed}, have {available}")]
    Missing {
        material: String,
        needed: u32,
        available: u32,
    },

    #[error("an upgrade needs a weapon in the main hand")]
    NoWeapon,

    #[error("no recipe named {0}")]
    UnknownRecipe(String),

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for CraftError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Missing { .. } | Self::NoWeapon => ErrorSeverity::Recoverable,
            Self::UnknownRecipe(_) => ErrorSeverity::Validation,
            Self::Inventory(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "CRAFT_MISSING_MATERIAL",
            Self::NoWeapon => "CRAFT_NO_WEAPON",
            Self::UnknownRecipe(_) => "CRAFT_UNKNOWN_RECIPE",
            Self::Inventory(err) => err.error_code(),
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaterialKind {
    Ore,
    Plant,
    Magic,
    Food,
}

/// A material definition from the content tables.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    /// Stock and recipe key, e.g. `iron_ore`.
    pub key: String,
    pub name: String,
    pub kind: MaterialKind,
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
}

/// Material counts carried by the player. Zero counts are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Materials(BTreeMap<String, u32>);

impl Materials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, amount: u32) {
        if amount == 0 {
            return;
        }
        let count = self.0.entry(key.into()).or_insert(0);
        *count = count.saturating_add(amount);
    }

    pub fn count(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(key, count)| (key.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First ingredient the stock cannot cover, in key order.
    ///
    /// # Errors
    ///
    /// [`CraftError::Missing`] naming the short material.
    pub fn check(&self, needs: &BTreeMap<String, u32>) -> Result<(), CraftError> {
        for (key, &needed) in needs {
            let available = self.count(key);
            if available < needed {
                return Err(CraftError::Missing {
                    material: key.clone(),
                    needed,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Remove every ingredient, or nothing at all.
    ///
    /// # Errors
    ///
    /// As [`Self::check`]; the stock is unchanged on error.
    pub fn consume(&mut self, needs: &BTreeMap<String, u32>) -> Result<(), CraftError> {
        self.check(needs)?;
        for (key, &needed) in needs {
            if let Some(count) = self.0.get_mut(key) {
                *count -= needed;
                if *count == 0 {
                    self.0.remove(key);
                }
            }
        }
        Ok(())
    }
}
