//! Crafting: raw materials and the recipes that turn them into items.
//!
//! Materials live outside the inventory as a stock of counts keyed by the
//! material's table key. [`crate::entity::Player::craft`] is the mutating entry
//! point; this module holds the data it reads.

pub mod material;
pub mod recipe;

pub use material::{CraftError, Material, MaterialKind, Materials};
pub use recipe::{CraftingTable, Recipe, RecipeOutput};
