//! Random item generation.

pub mod factory;
pub mod rarity;

pub use factory::{ItemFactory, LootKind, LootRequest};
