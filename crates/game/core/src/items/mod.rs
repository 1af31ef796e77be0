//! Items and the inventory that owns them.

pub mod inventory;
pub mod item;

pub use inventory::{Inventory, InventoryError};
pub use item::{
    ArmorType, Gear, GearKind, Item, ItemError, Potion, PotionEffect, Rarity, Scroll, WeaponType,
};
