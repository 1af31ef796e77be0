//! Active abilities: stamina/mana skills and spells.

pub mod skill;
pub mod spell;

pub use skill::{Skill, SkillError};
pub use spell::{Spell, SpellEffect, SpellError, SpellReport};
