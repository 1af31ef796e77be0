//! Character progression: classes, difficulty modes, masteries and quests.
//!
//! The mutating entry points (`gain_xp`, `choose_class`, `update_quests`, ...)
//! live on [`crate::entity::Player`]; this module holds the data they read.

pub mod class;
pub mod difficulty;
pub mod mastery;
pub mod quest;

pub use class::{PlayerClass, unlocked_at};
pub use difficulty::{Difficulty, LevelUpBonus};
pub use mastery::{Masteries, Mastery, MasteryBonus};
pub use quest::{Quest, objective};
