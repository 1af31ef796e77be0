//! Stat system.
//!
//! # Architecture
//!
//! ```text
//! [ Permanent ]   base stats, level-ups, class bonuses
//! [ Temporary ]   potion buffs, skill bonuses, shields
//! [ Equipment ]   rebuilt from worn gear and set bonuses
//!      ↓
//! [ Total ]       cached sum, never written directly
//! ```
//!
//! Resource pools (hp, mana, stamina) spend temporary first and restore
//! permanent first; see [`resources`].

pub mod block;
pub mod name;
pub mod resources;

pub use block::StatBlock;
pub use name::{Layer, StatName, StatValues};
pub use resources::{Drain, ResourceKind};
