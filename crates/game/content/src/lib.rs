//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game content and the loaders for its RON/TOML
//! data files:
//! - Armor sets and their tier bonuses
//! - The enemy and boss roster
//! - Class skills, spells and class definitions
//! - Starting quests
//! - Game configuration (TOML)
//!
//! Content is consumed through [`dungeon_core::TablesOracle`] and never
//! appears in save files.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, TablesLoader};
