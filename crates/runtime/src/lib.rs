//! Drives a dungeon run on top of the rules in `dungeon-core`.
//!
//! Modules are organized by responsibility:
//! - [`session`] walks the player through rooms and level clears
//! - [`dungeon`] lays out levels and rolls room contents
//! - [`input`] is the decision seam for combat, shops and puzzles
//! - [`puzzle`] rolls and plays puzzle rooms
//! - [`autopilot`] makes every decision for unattended runs
//! - [`repository`] persists the player between rooms
//! - [`logging`], [`config`] and [`dirs`] set up a binary's environment
pub mod autopilot;
pub mod config;
pub mod dirs;
pub mod dungeon;
pub mod input;
pub mod logging;
pub mod puzzle;
pub mod repository;
pub mod session;

pub use autopilot::{AutoPilot, Score, Temperament};
pub use config::RuntimeConfig;
pub use dungeon::{Dungeon, Room, RoomKind, Trap};
pub use input::{PuzzlePrompt, Question, RoomInput, ScriptedRoomInput, ShopChoice, ShopView};
pub use logging::LogConfig;
pub use puzzle::{Puzzle, PuzzleKind, PuzzleReport, PuzzleReward};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use session::{LevelReport, RoomOutcome, RoomReport, Session, TrapOutcome};
