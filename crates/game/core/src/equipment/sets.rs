//! Armor set bonuses and the equipment aggregation pass.
//!
//! The aggregation is a pure function of the worn gear: it sums every item's
//! effects, counts set pieces and adds each unlocked tier. Callers apply the
//! result to a freshly reset equipment layer, so unequip + re-equip of the same
//! loadout always lands on the same numbers.

use std::collections::BTreeMap;

use super::slots::{Equipment, Slot};
use crate::items::WeaponType;

/// One threshold of a set.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetTier {
    /// Pieces required.
    pub threshold: u8,
    /// Bonus identifier, e.g. `quick_strikes`.
    pub name: String,
    /// Stat deltas keyed by data-file stat name. Names outside the stat schema
    /// are kept here and dropped with a warning when applied.
    pub effects: Vec<(String, f64)>,
}

/// Weapon dropped alongside a set by the enemies that wear it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetWeapon {
    pub name: String,
    pub weapon_type: WeaponType,
}

/// A named armor set. A piece belongs to the set when its name contains `name`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorSet {
    pub name: String,
    /// Enemy type whose loot is drawn from this set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub enemy_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<SetWeapon>,
    pub tiers: Vec<SetTier>,
}

/// All known armor sets, in lookup priority order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArmorSetTable {
    sets: Vec<ArmorSet>,
}

/// A tier currently unlocked by worn armor.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSetBonus {
    pub set: String,
    pub bonus: String,
    pub threshold: u8,
}

/// Output of [`ArmorSetTable::aggregate`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregate {
    /// Summed stat deltas, keyed by data-file stat name.
    pub effects: BTreeMap<String, f64>,
    /// Unlocked tiers in set order, thresholds ascending.
    pub active: Vec<ActiveSetBonus>,
}

impl ArmorSetTable {
    pub fn new(mut sets: Vec<ArmorSet>) -> Self {
        for set in &mut sets {
            set.tiers.sort_by_key(|tier| tier.threshold);
        }
        Self { sets }
    }

    pub fn get(&self, name: &str) -> Option<&ArmorSet> {
        self.sets.iter().find(|set| set.name == name)
    }

    /// First set whose name appears in `item_name`.
    pub fn set_for(&self, item_name: &str) -> Option<&ArmorSet> {
        self.sets.iter().find(|set| item_name.contains(set.name.as_str()))
    }

    /// Set worn by an enemy type.
    pub fn for_enemy(&self, enemy_type: &str) -> Option<&ArmorSet> {
        self.sets
            .iter()
            .find(|set| set.enemy_type.as_deref() == Some(enemy_type))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArmorSet> {
        self.sets.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Pieces worn per set, counting helmet, chest, gauntlets, leggings and boots.
    pub fn count_pieces(&self, equipment: &Equipment) -> BTreeMap<String, u8> {
        let mut counts = BTreeMap::new();
        for slot in Slot::SET_PIECES {
            let Some(gear) = equipment.get(slot) else {
                continue;
            };
            if let Some(set) = self.set_for(&gear.name) {
                *counts.entry(set.name.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Sum gear effects and unlocked set tiers for the given loadout.
    pub fn aggregate(&self, equipment: &Equipment) -> Aggregate {
        let mut aggregate = Aggregate::default();

        for (_, gear) in equipment.iter() {
            for (stat, value) in &gear.effects {
                *aggregate.effects.entry(stat.to_string()).or_insert(0.0) += value;
            }
        }

        let counts = self.count_pieces(equipment);
        for set in &self.sets {
            let Some(&count) = counts.get(&set.name) else {
                continue;
            };
            for tier in set.tiers.iter().filter(|tier| count >= tier.threshold) {
                for (stat, value) in &tier.effects {
                    *aggregate.effects.entry(stat.clone()).or_insert(0.0) += value;
                }
                aggregate.active.push(ActiveSetBonus {
                    set: set.name.clone(),
                    bonus: tier.name.clone(),
                    threshold: tier.threshold,
                });
            }
        }

        aggregate
    }
}
