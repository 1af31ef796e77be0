//! Stat schema shared by every layer.
//!
//! The permanent layer defines which names are valid. Because every layer is a
//! fixed array indexed by [`StatName`], a stat present in one layer is always
//! present (possibly zero) in the others.

use core::ops::{Index, IndexMut};
use core::str::FromStr;

use strum::{EnumCount, IntoEnumIterator};

// ============================================================================
// Stat Names
// ============================================================================

/// Every stat tracked by a [`super::StatBlock`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatName {
    Hp,
    MaxHp,
    Attack,
    Defense,
    MagicDamage,
    MagicDefense,
    Agility,
    Luck,
    Mana,
    MaxMana,
    Stamina,
    MaxStamina,
    CriticalChance,
}

impl StatName {
    /// Default permanent value for a freshly constructed entity.
    pub const fn default_value(self) -> f64 {
        match self {
            Self::Hp | Self::MaxHp => 100.0,
            Self::Attack => 10.0,
            Self::Defense => 5.0,
            Self::MagicDamage | Self::MagicDefense => 1.0,
            Self::Agility | Self::Luck => 5.0,
            Self::Mana | Self::MaxMana => 20.0,
            Self::Stamina | Self::MaxStamina => 50.0,
            Self::CriticalChance => 5.0,
        }
    }

    /// Parse a data-file stat key, returning `None` for names outside the schema.
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(name).ok()
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Which additive source a stat contribution belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Layer {
    Permanent,
    Temporary,
    Equipment,
}

// ============================================================================
// Stat Values
// ============================================================================

/// One value per [`StatName`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatValues([f64; StatName::COUNT]);

impl StatValues {
    /// All stats at zero.
    pub const fn zeroed() -> Self {
        Self([0.0; StatName::COUNT])
    }

    /// All stats at their [`StatName::default_value`].
    pub fn defaults() -> Self {
        let mut values = Self::zeroed();
        for stat in StatName::iter() {
            values[stat] = stat.default_value();
        }
        values
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatName, f64)> + '_ {
        StatName::iter().map(move |stat| (stat, self[stat]))
    }

    /// Non-zero entries only.
    pub fn non_zero(&self) -> impl Iterator<Item = (StatName, f64)> + '_ {
        self.iter().filter(|(_, value)| *value != 0.0)
    }

    pub fn clear(&mut self) {
        self.0 = [0.0; StatName::COUNT];
    }
}

impl Default for StatValues {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Index<StatName> for StatValues {
    type Output = f64;

    fn index(&self, stat: StatName) -> &f64 {
        &self.0[stat.index()]
    }
}

impl IndexMut<StatName> for StatValues {
    fn index_mut(&mut self, stat: StatName) -> &mut f64 {
        &mut self.0[stat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(StatName::parse("max_hp"), Some(StatName::MaxHp));
        assert_eq!(StatName::parse("critical_chance"), Some(StatName::CriticalChance));
        assert_eq!(StatName::parse("hp_regen"), None);
        assert_eq!(StatName::MaxStamina.to_string(), "max_stamina");
    }

    #[test]
    fn defaults_match_schema() {
        let values = StatValues::defaults();
        assert_eq!(values[StatName::Hp], 100.0);
        assert_eq!(values[StatName::Mana], 20.0);
        assert_eq!(values[StatName::Stamina], 50.0);
        assert_eq!(values[StatName::CriticalChance], 5.0);
    }

    #[test]
    fn non_zero_skips_empty_entries() {
        let mut values = StatValues::zeroed();
        values[StatName::Luck] = 3.0;
        let entries: Vec<_> = values.non_zero().collect();
        assert_eq!(entries, vec![(StatName::Luck, 3.0)]);
    }
}
