//! The player character.
//!
//! Behaviour is split by concern:
//!
//! - [`equip`]: moving gear between inventory and slots, and the equipment
//!   recompute that follows every change
//! - [`progress`]: xp, level-ups, classes, quests, difficulty modes and NG+
//! - [`consumables`]: potions, spells and scrolls
//! - [`trade`]: buying from and selling to shops
//! - [`craft`]: turning materials into items and weapon upgrades

mod consumables;
mod craft;
mod equip;
mod progress;
mod trade;

use std::collections::{BTreeMap, BTreeSet};

pub use consumables::{ConsumableError, PotionOutcome};
pub use craft::CraftOutcome;
pub use equip::EquipOutcome;
pub use progress::DifficultySnapshot;
pub use trade::TradeError;

use super::Entity;
use crate::config::GameConfig;
use crate::crafting::Materials;
use crate::equipment::{Equipment, Slot};
use crate::items::{Inventory, Potion, PotionEffect};
use crate::progression::{Difficulty, Masteries, Quest};
use crate::skills::{Skill, Spell};
use crate::stats::{Layer, StatBlock, StatName};

/// Player state, the unit of persistence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub entity: Entity,
    pub level: u32,
    pub xp: f64,
    pub max_xp: f64,
    pub gold: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub souls: u32,

    // ===== counters =====
    #[cfg_attr(feature = "serde", serde(default))]
    pub kills: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bosses_defeated: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub critical_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_dealt: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_taken: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold_spent: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shops_visited: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub puzzles_solved: u32,

    // ===== possessions =====
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<Spell>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub masteries: Masteries,
    /// Crafting materials, kept apart from the inventory.
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: Materials,

    // ===== progression =====
    #[cfg_attr(feature = "serde", serde(default))]
    pub quests: Vec<Quest>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed_quests: Vec<Quest>,
    pub class_name: String,
    pub dungeon_level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty: Difficulty,
    /// NG+ cycles completed, per difficulty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ng_plus: BTreeMap<Difficulty, u32>,
    /// Progress parked in other difficulties.
    #[cfg_attr(feature = "serde", serde(default))]
    pub difficulty_data: BTreeMap<Difficulty, DifficultySnapshot>,

    // ===== set bonuses =====
    /// Bonus names unlocked by the current loadout.
    #[cfg_attr(feature = "serde", serde(default))]
    pub active_set_bonuses: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    seen_set_bonuses: BTreeSet<String>,
}

impl Player {
    pub const DEFAULT_CLASS: &'static str = "Novice";

    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, &GameConfig::default())
    }

    /// Fresh level-1 character carrying one minor health potion.
    pub fn from_config(name: impl Into<String>, config: &GameConfig) -> Self {
        let mut inventory = Inventory::new();
        // An empty, unlimited inventory always has room.
        let _ = inventory.add(starting_potion());

        Self {
            entity: Entity::new(name, Self::base_stats()),
            level: GameConfig::STARTING_LEVEL,
            xp: 0.0,
            max_xp: GameConfig::STARTING_MAX_XP,
            gold: config.starting_gold,
            souls: 0,
            kills: 0,
            bosses_defeated: 0,
            critical_count: 0,
            attack_count: 0,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            gold_spent: 0,
            shops_visited: 0,
            puzzles_solved: 0,
            equipment: Equipment::new(),
            inventory,
            skills: Vec::new(),
            spells: Vec::new(),
            masteries: Masteries::default(),
            materials: Materials::new(),
            quests: Vec::new(),
            completed_quests: Vec::new(),
            class_name: Self::DEFAULT_CLASS.to_owned(),
            dungeon_level: 1,
            difficulty: Difficulty::Normal,
            ng_plus: BTreeMap::new(),
            difficulty_data: BTreeMap::new(),
            active_set_bonuses: Vec::new(),
            seen_set_bonuses: BTreeSet::new(),
        }
    }

    /// Stat block of a fresh character.
    pub fn base_stats() -> StatBlock {
        let mut stats = StatBlock::new();
        stats.set_stat(StatName::Attack, GameConfig::PLAYER_BASE_ATTACK, Layer::Permanent);
        stats
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn stats(&self) -> &StatBlock {
        &self.entity.stats
    }

    pub fn stat(&self, stat: StatName) -> f64 {
        self.entity.stats.get(stat)
    }

    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    /// NG+ cycle of the current difficulty.
    pub fn ng_plus(&self) -> u32 {
        self.ng_plus.get(&self.difficulty).copied().unwrap_or(0)
    }

    /// Attack plus weapon damage.
    ///
    /// # Formula
    ///
    /// ```text
    /// both hands armed: attack + floor((main + off) / 1.5)
    /// otherwise:        attack + main
    /// ```
    pub fn total_damage(&self) -> f64 {
        let attack = self.stat(StatName::Attack);
        let (main, off) = self.equipment.weapon_damage();
        let dual = self.equipment.is_occupied(Slot::MainHand)
            && self.equipment.is_occupied(Slot::OffHand);
        if dual {
            attack + ((main + off) / 1.5).floor()
        } else {
            attack + main
        }
    }

    /// Book a defeated enemy: a kill and a soul, plus the boss counter.
    pub fn record_kill(&mut self, is_boss: bool) {
        self.kills += 1;
        self.souls += 1;
        if is_boss {
            self.bosses_defeated += 1;
        }
    }
}

fn starting_potion() -> Potion {
    let mut potion = Potion::new("Minor Health Potion", PotionEffect::Heal, 50.0).with_value(100);
    potion.description = "Restores some health".to_owned();
    potion
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::equipment::ArmorSetTable;
    use crate::items::{Gear, Item, WeaponType};

    pub(crate) fn hero() -> Player {
        Player::new("Hero")
    }

    #[test]
    fn fresh_player_starting_state() {
        let player = hero();
        assert_eq!(player.gold, 50);
        assert_eq!(player.stat(StatName::Attack), 5.0);
        assert_eq!(player.class_name, "Novice");
        assert_eq!(player.inventory.len(), 1);
        match player.inventory.get(0) {
            Some(Item::Potion(potion)) => {
                assert_eq!(potion.name, "Minor Health Potion");
                assert_eq!(potion.effect(), Some(PotionEffect::Heal));
                assert_eq!(potion.effect_value, 50.0);
            }
            other => panic!("unexpected starting item: {other:?}"),
        }
    }

    #[test]
    fn dual_wield_blends_weapon_damage() {
        let sets = ArmorSetTable::default();
        let mut player = hero();
        player.equip(Gear::weapon("Sword", WeaponType::Sword, 10.0), &sets).unwrap();
        assert_eq!(player.total_damage(), 15.0);
        player.equip(Gear::weapon("Dagger", WeaponType::Dagger, 6.0), &sets).unwrap();
        assert_eq!(player.total_damage(), 15.0);
    }

    #[test]
    fn single_weapon_adds_full_damage() {
        let sets = ArmorSetTable::default();
        let mut player = hero();
        player.equip(Gear::weapon("Axe", WeaponType::Axe, 7.0), &sets).unwrap();
        assert_eq!(player.total_damage(), 12.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn save_round_trip_preserves_state() {
        use crate::env::SequenceRng;
        use crate::status::StatusEffect;

        let sets = ArmorSetTable::default();
        let mut player = hero();
        player.equip(Gear::weapon("Sword", WeaponType::Sword, 10.0), &sets).unwrap();
        player
            .entity
            .try_apply_status(StatusEffect::poison(), &mut SequenceRng::constant(0.0));
        player.masteries.gain_xp(WeaponType::Sword, 30.0);
        player.entity.take_damage(12.0);

        let json = serde_json::to_string(&player).unwrap();
        let restored: Player = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, player);
        assert_eq!(restored.total_damage(), 15.0);
        assert!(restored.entity.status.contains("Poison"));
    }

    #[test]
    fn kills_count_souls_and_bosses() {
        let mut player = hero();
        player.record_kill(false);
        player.record_kill(true);
        assert_eq!((player.kills, player.souls, player.bosses_defeated), (2, 2, 1));
    }
}
