//! Status effects: buffs, debuffs, damage over time and control.
//!
//! ```text
//! Inactive ──(resistance roll)──▶ Applied ──(turn start: DOT, duration-1)──▶ … ──▶ Expired
//! ```
//!
//! The roll and the apply hooks live on [`crate::entity::Entity`], which owns
//! the stats the hooks mutate.

pub mod effect;
pub mod list;
pub mod resistance;

pub use effect::{EffectCategory, EffectKind, ResistanceKind, StatusEffect};
pub use list::{Insertion, StatusEffects};
pub use resistance::Resistances;
