//! Equipment slots and armor set bonuses.
//!
//! Equipping is an owner-level operation (see [`crate::entity::Player::equip`])
//! because it moves items out of the inventory and rebuilds the owner's
//! equipment layer. This module only knows about slots and aggregation.

pub mod sets;
pub mod slots;

pub use sets::{ActiveSetBonus, Aggregate, ArmorSet, ArmorSetTable, SetTier, SetWeapon};
pub use slots::{EquipError, Equipment, Slot};
