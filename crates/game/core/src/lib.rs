//! Rules of the dungeon crawler: characters, gear and the combat loop.
//!
//! `dungeon-core` owns every game rule and no I/O. Content tables and
//! randomness come in through the oracles in [`env`]; persistence and
//! presentation live in the runtime crate. All player mutation goes through
//! methods on [`Player`] or through [`CombatController`], and every change to
//! equipment ends in a full recomputation of the equipment layer.
pub mod combat;
pub mod config;
pub mod crafting;
pub mod entity;
pub mod env;
pub mod equipment;
pub mod error;
pub mod items;
pub mod loot;
pub mod progression;
pub mod skills;
pub mod stats;
pub mod status;

pub use combat::{
    CombatController, CombatError, CombatEvent, CombatInput, CombatOutcome, CombatReport,
    CombatView, PlayerChoice, ScriptedInput,
};
pub use config::{CombatTables, GameConfig};
pub use crafting::{CraftError, CraftingTable, Material, Materials, Recipe, RecipeOutput};
pub use entity::{
    ApplyOutcome, ConsumableError, CraftOutcome, Enemy, EnemyRoster, EnemyTemplate, Entity,
    EquipOutcome, Player, PotionOutcome, TradeError,
};
pub use env::{GameRng, RngOracle, SequenceRng, StaticTables, TablesOracle};
pub use equipment::{ArmorSet, ArmorSetTable, EquipError, Equipment, Slot};
pub use error::{ErrorSeverity, GameError};
pub use items::{Gear, GearKind, Inventory, InventoryError, Item, Potion, Rarity};
pub use loot::{ItemFactory, LootKind, LootRequest};
pub use progression::{Difficulty, PlayerClass, Quest};
pub use skills::{Skill, SkillError, Spell, SpellEffect, SpellError};
pub use stats::{Layer, StatBlock, StatName};
pub use status::{EffectKind, StatusEffect};
