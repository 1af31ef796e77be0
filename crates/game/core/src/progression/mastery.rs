//! Weapon masteries: per weapon-type experience that scales damage.

use std::collections::BTreeMap;

use crate::items::WeaponType;

/// Damage and accuracy adjustments granted by a mastery level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MasteryBonus {
    pub damage_multiplier: f64,
    pub accuracy: f64,
}

impl MasteryBonus {
    pub const NEUTRAL: Self = Self {
        damage_multiplier: 1.0,
        accuracy: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mastery {
    pub level: u32,
    pub xp: f64,
    pub max_xp: f64,
}

impl Default for Mastery {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0.0,
            max_xp: 100.0,
        }
    }
}

impl Mastery {
    /// Add xp and return the number of levels gained.
    pub fn gain_xp(&mut self, amount: f64) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.max_xp > 0.0 && self.xp >= self.max_xp {
            self.xp -= self.max_xp;
            self.level += 1;
            self.max_xp = (self.max_xp * 1.5).floor();
            gained += 1;
        }
        gained
    }

    /// # Formula
    ///
    /// ```text
    /// level 0: damage x0.9, accuracy -0.10
    /// level 1: neutral
    /// level l: damage x(1 + 0.05(l-1)), accuracy +0.02(l-1)
    /// ```
    pub fn bonus(&self) -> MasteryBonus {
        match self.level {
            0 => MasteryBonus {
                damage_multiplier: 0.9,
                accuracy: -0.10,
            },
            1 => MasteryBonus::NEUTRAL,
            level => {
                let steps = f64::from(level - 1);
                MasteryBonus {
                    damage_multiplier: 1.0 + 0.05 * steps,
                    accuracy: 0.02 * steps,
                }
            }
        }
    }
}

/// Masteries keyed by `weapon::<WeaponType>`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Masteries(BTreeMap<String, Mastery>);

impl Masteries {
    pub fn key(weapon_type: WeaponType) -> String {
        format!("weapon::{weapon_type}")
    }

    pub fn get(&self, weapon_type: WeaponType) -> Option<&Mastery> {
        self.0.get(&Self::key(weapon_type))
    }

    /// Bonus for a weapon type; neutral when untrained.
    pub fn bonus(&self, weapon_type: WeaponType) -> MasteryBonus {
        self.get(weapon_type).map_or(MasteryBonus::NEUTRAL, Mastery::bonus)
    }

    /// Add xp, creating the mastery on first use. Returns levels gained.
    pub fn gain_xp(&mut self, weapon_type: WeaponType, amount: f64) -> u32 {
        let gained = self.0.entry(Self::key(weapon_type)).or_default().gain_xp(amount);
        if gained > 0 {
            tracing::info!(weapon = %weapon_type, gained, "mastery improved");
        }
        gained
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Mastery)> {
        self.0.iter().map(|(key, mastery)| (key.as_str(), mastery))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
