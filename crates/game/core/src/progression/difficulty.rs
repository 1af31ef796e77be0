//! Difficulty modes and their balance tables.

use crate::items::Rarity;

/// Permanent stat gains granted on level-up.
///
/// `hp`, `mana` and `stamina` raise the matching maximum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelUpBonus {
    pub hp: f64,
    pub mana: f64,
    pub stamina: f64,
    pub attack: f64,
    pub defense: f64,
    pub agility: f64,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Difficulty {
    #[default]
    Normal,
    SoulEnjoyer,
    Realistic,
    Hardcore,
    Puzzle,
}

const SIX: &[Rarity] = &[
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
    Rarity::Divine,
];

const SEVEN: &[Rarity] = &[
    Rarity::Common,
    Rarity::Uncommon,
    Rarity::Rare,
    Rarity::Epic,
    Rarity::Legendary,
    Rarity::Divine,
    Rarity::Unknown,
];

const THREE: &[Rarity] = &[Rarity::Common, Rarity::Uncommon, Rarity::Rare];

impl Difficulty {
    pub const fn level_up_bonus(self) -> LevelUpBonus {
        let (hp, mana, stamina, attack, defense, agility) = match self {
            Self::Normal | Self::SoulEnjoyer => (10.0, 5.0, 5.0, 2.0, 2.0, 1.0),
            Self::Realistic => (5.0, 3.0, 3.0, 1.0, 1.0, 0.0),
            Self::Hardcore => (3.0, 2.0, 2.0, 1.0, 1.0, 0.0),
            Self::Puzzle => (8.0, 6.0, 6.0, 2.0, 2.0, 1.0),
        };
        LevelUpBonus {
            hp,
            mana,
            stamina,
            attack,
            defense,
            agility,
        }
    }

    /// Multiplier folded into loot rarity weights.
    pub const fn rarity_boost(self) -> f64 {
        match self {
            Self::Hardcore => 0.8,
            Self::Puzzle => 1.1,
            _ => 1.0,
        }
    }

    /// Rarities loot may roll, most common first.
    pub const fn available_rarities(self) -> &'static [Rarity] {
        match self {
            Self::Normal | Self::SoulEnjoyer => SIX,
            Self::Realistic | Self::Puzzle => SEVEN,
            Self::Hardcore => THREE,
        }
    }

    pub const fn inventory_limit(self) -> Option<usize> {
        match self {
            Self::Realistic => Some(30),
            Self::Hardcore => Some(20),
            _ => None,
        }
    }

    /// Inclusive bounds on rooms per dungeon level, boss room excluded.
    pub const fn room_count_range(self) -> (u32, u32) {
        match self {
            Self::Normal => (5, 8),
            Self::SoulEnjoyer => (6, 10),
            Self::Realistic => (50, 100),
            Self::Hardcore => (10, 15),
            Self::Puzzle => (5, 7),
        }
    }

    /// Inclusive bounds on items a shop stocks.
    pub const fn shop_stock_range(self) -> (u32, u32) {
        match self {
            Self::Normal => (5, 7),
            Self::SoulEnjoyer => (3, 6),
            Self::Realistic => (2, 5),
            Self::Hardcore => (1, 3),
            Self::Puzzle => (3, 5),
        }
    }

    pub const fn damage_dealt_multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::SoulEnjoyer => 1.2,
            Self::Realistic => 0.9,
            Self::Hardcore => 0.8,
            Self::Puzzle => 1.1,
        }
    }

    pub const fn damage_taken_multiplier(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::SoulEnjoyer => 0.8,
            Self::Realistic => 1.2,
            Self::Hardcore => 1.5,
            Self::Puzzle => 0.7,
        }
    }

    /// Player damage after the mode modifier, truncated. Normal is the identity.
    pub fn modify_damage_dealt(self, damage: f64) -> f64 {
        match self {
            Self::Normal => damage,
            _ => (damage * self.damage_dealt_multiplier()).floor(),
        }
    }

    /// Damage taken by the player after the mode modifier, truncated.
    pub fn modify_damage_taken(self, damage: f64) -> f64 {
        match self {
            Self::Normal => damage,
            _ => (damage * self.damage_taken_multiplier()).floor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn normal_is_identity() {
        assert_eq!(Difficulty::Normal.modify_damage_dealt(17.5), 17.5);
        assert_eq!(Difficulty::Normal.modify_damage_taken(3.0), 3.0);
    }

    #[test]
    fn modes_scale_and_truncate() {
        assert_eq!(Difficulty::SoulEnjoyer.modify_damage_dealt(11.0), 13.0);
        assert_eq!(Difficulty::Hardcore.modify_damage_taken(9.0), 13.0);
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(Difficulty::from_str("soul_enjoyer"), Ok(Difficulty::SoulEnjoyer));
        assert_eq!(Difficulty::Hardcore.to_string(), "hardcore");
    }

    #[test]
    fn hardcore_is_restrictive() {
        assert_eq!(Difficulty::Hardcore.available_rarities().len(), 3);
        assert_eq!(Difficulty::Hardcore.inventory_limit(), Some(20));
        assert_eq!(Difficulty::Realistic.available_rarities().last(), Some(&Rarity::Unknown));
    }

    #[test]
    fn room_counts_are_ordered_ranges() {
        for mode in Difficulty::iter() {
            let (lo, hi) = mode.room_count_range();
            assert!(lo <= hi, "{mode}");
        }
        assert_eq!(Difficulty::Realistic.room_count_range(), (50, 100));
    }

    #[test]
    fn hardcore_shops_stock_least() {
        assert_eq!(Difficulty::Hardcore.shop_stock_range(), (1, 3));
        for mode in Difficulty::iter() {
            let (lo, hi) = mode.shop_stock_range();
            assert!(lo >= 1 && lo <= hi, "{mode}");
        }
    }
}
