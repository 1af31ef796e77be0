//! Item definitions: wearable gear, potions and spell scrolls.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::skills::Spell;
use crate::stats::StatName;

// ============================================================================
// Classification
// ============================================================================

/// Rarity tier, ordered from most to least common.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Divine,
    #[strum(serialize = "???")]
    #[cfg_attr(feature = "serde", serde(rename = "???"))]
    Unknown,
}

impl Rarity {
    /// Stat and value multiplier for generated items.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Uncommon => 1.5,
            Self::Rare => 2.0,
            Self::Epic => 3.0,
            Self::Legendary => 5.0,
            Self::Divine => 10.0,
            Self::Unknown => 100.0,
        }
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    Sword,
    Axe,
    Dagger,
    Mace,
    Staff,
    Bow,
}

/// Armor pieces. Each maps to exactly one equipment slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmorType {
    Helmet,
    Chestplate,
    Gauntlets,
    Leggings,
    Boots,
    Shield,
}

impl ArmorType {
    /// Parse a data-file armor type.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::UnknownArmorType`] for names without a slot.
    pub fn parse(name: &str) -> Result<Self, ItemError> {
        Self::from_str(name).map_err(|_| ItemError::UnknownArmorType(name.to_owned()))
    }
}

/// Errors raised while building items from loose data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("armor type `{0}` has no equipment slot")]
    UnknownArmorType(String),

    #[error("weapon type `{0}` is not recognised")]
    UnknownWeaponType(String),
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownArmorType(_) => "ITEM_UNKNOWN_ARMOR_TYPE",
            Self::UnknownWeaponType(_) => "ITEM_UNKNOWN_WEAPON_TYPE",
        }
    }
}

// ============================================================================
// Gear
// ============================================================================

/// What kind of wearable a [`Gear`] is.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum GearKind {
    Weapon { weapon_type: WeaponType, damage: f64 },
    Armor { armor_type: ArmorType },
    Ring,
    Amulet,
    Belt,
}

/// Wearable item whose `effects` feed the equipment layer while worn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gear {
    pub name: String,
    pub description: String,
    pub value: u32,
    pub rarity: Rarity,
    pub kind: GearKind,
    pub effects: BTreeMap<StatName, f64>,
}

impl Gear {
    pub fn new(name: impl Into<String>, kind: GearKind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            value: 0,
            rarity: Rarity::Common,
            kind,
            effects: BTreeMap::new(),
        }
    }

    pub fn weapon(name: impl Into<String>, weapon_type: WeaponType, damage: f64) -> Self {
        Self::new(name, GearKind::Weapon { weapon_type, damage })
    }

    pub fn armor(name: impl Into<String>, armor_type: ArmorType, defense: f64) -> Self {
        Self::new(name, GearKind::Armor { armor_type }).with_effect(StatName::Defense, defense)
    }

    #[must_use]
    pub fn with_effect(mut self, stat: StatName, value: f64) -> Self {
        *self.effects.entry(stat).or_insert(0.0) += value;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Weapon damage, zero for anything else.
    pub fn damage(&self) -> f64 {
        match self.kind {
            GearKind::Weapon { damage, .. } => damage,
            _ => 0.0,
        }
    }

    pub fn weapon_type(&self) -> Option<WeaponType> {
        match self.kind {
            GearKind::Weapon { weapon_type, .. } => Some(weapon_type),
            _ => None,
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, GearKind::Weapon { .. })
    }

    /// Raise weapon damage by `amount`. Returns `false` for non-weapons.
    pub fn sharpen(&mut self, amount: f64) -> bool {
        match &mut self.kind {
            GearKind::Weapon { damage, .. } => {
                *damage += amount;
                true
            }
            _ => false,
        }
    }
}

// ============================================================================
// Consumables
// ============================================================================

/// Potion effect families understood by the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PotionEffect {
    Heal,
    AttackBoost,
    DefenseBoost,
    LuckBoost,
    FireResistance,
}

/// Single-use consumable.
///
/// `effect_type` stays a string so unknown effects from old saves or data
/// files survive a round trip; they are logged and ignored on use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    pub name: String,
    pub description: String,
    pub value: u32,
    pub rarity: Rarity,
    pub effect_type: String,
    pub effect_value: f64,
}

impl Potion {
    pub fn new(name: impl Into<String>, effect: PotionEffect, effect_value: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            value: 0,
            rarity: Rarity::Common,
            effect_type: effect.to_string(),
            effect_value,
        }
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Parsed effect, `None` when the stored type is unknown.
    pub fn effect(&self) -> Option<PotionEffect> {
        PotionEffect::from_str(&self.effect_type).ok()
    }
}

/// Consumable wrapper around a spell, destroyed after a successful cast.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scroll {
    pub name: String,
    pub description: String,
    pub value: u32,
    pub spell: Spell,
}

impl Scroll {
    /// Default value of a scroll.
    pub const DEFAULT_VALUE: u32 = 500;

    pub fn of(spell: Spell) -> Self {
        Self {
            name: format!("Scroll of {}", spell.name),
            description: format!("A scroll that allows you to cast {}.", spell.name),
            value: Self::DEFAULT_VALUE,
            spell,
        }
    }
}

// ============================================================================
// Item
// ============================================================================

/// Anything that can sit in an inventory.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "item", rename_all = "snake_case"))]
pub enum Item {
    Gear(Gear),
    Potion(Potion),
    Scroll(Scroll),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Self::Gear(gear) => &gear.name,
            Self::Potion(potion) => &potion.name,
            Self::Scroll(scroll) => &scroll.name,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Gear(gear) => &gear.description,
            Self::Potion(potion) => &potion.description,
            Self::Scroll(scroll) => &scroll.description,
        }
    }

    pub fn value(&self) -> u32 {
        match self {
            Self::Gear(gear) => gear.value,
            Self::Potion(potion) => potion.value,
            Self::Scroll(scroll) => scroll.value,
        }
    }

    /// Price a shop pays for this item: half its value, rounded down.
    pub fn sell_value(&self) -> u32 {
        self.value() / 2
    }

    pub fn is_potion(&self) -> bool {
        matches!(self, Self::Potion(_))
    }

    pub fn as_gear(&self) -> Option<&Gear> {
        match self {
            Self::Gear(gear) => Some(gear),
            _ => None,
        }
    }
}

impl From<Gear> for Item {
    fn from(gear: Gear) -> Self {
        Self::Gear(gear)
    }
}

impl From<Potion> for Item {
    fn from(potion: Potion) -> Self {
        Self::Potion(potion)
    }
}

impl From<Scroll> for Item {
    fn from(scroll: Scroll) -> Self {
        Self::Scroll(scroll)
    }
}
