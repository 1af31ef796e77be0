//! Turn-based combat.
//!
//! - [`formulas`]: pure probability, cost and mitigation functions
//! - [`controller`]: the round loop that applies them to a player and a room
//!   of enemies
//! - [`input`]: where the player's decisions come from
//! - [`event`]: what the loop reports back

pub mod controller;
pub mod event;
pub mod formulas;
pub mod input;

pub use controller::{CombatController, CombatReport};
pub use event::{CombatError, CombatEvent, CombatOutcome};
pub use input::{CombatInput, CombatView, PlayerChoice, ScriptedInput};
