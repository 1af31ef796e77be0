//! Read-only world data and the randomness source.
//!
//! [`TablesOracle`] exposes the content tables (sets, enemies, skills, spells,
//! classes, quests) and the balance config. [`RngOracle`] is the only source
//! of randomness. Both are injected so the core never reads files or global
//! state.
mod rng;
mod tables;

pub use rng::{GameRng, RngOracle, SequenceRng};
pub use tables::{StaticTables, TablesOracle};
