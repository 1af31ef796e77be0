use super::Player;
use crate::crafting::{CraftError, Recipe, RecipeOutput};
use crate::equipment::Slot;

/// What a successful craft produced.
#[derive(Clone, Debug, PartialEq)]
pub enum CraftOutcome {
    /// Name of the new item, now in the inventory.
    Crafted(String),
    Upgraded { weapon: String, damage: f64 },
}

impl Player {
    /// Spend a recipe's ingredients and collect its output.
    ///
    /// Item outputs go to the inventory. Upgrades sharpen the main-hand weapon,
    /// which [`Player::total_damage`] reads directly.
    ///
    /// # Errors
    ///
    /// - [`CraftError::Missing`] when an ingredient is short
    /// - [`CraftError::NoWeapon`] for an upgrade with an empty main hand
    /// - [`CraftError::Inventory`] when the inventory is full
    ///
    /// Materials are only spent on success.
    pub fn craft(&mut self, recipe: &Recipe) -> Result<CraftOutcome, CraftError> {
        self.materials.check(&recipe.ingredients)?;

        let outcome = match &recipe.output {
            RecipeOutput::Upgrade { damage } => {
                let weapon = self
                    .equipment
                    .get_mut(Slot::MainHand)
                    .filter(|gear| gear.is_weapon())
                    .ok_or(CraftError::NoWeapon)?;
                weapon.sharpen(*damage);
                CraftOutcome::Upgraded {
                    weapon: weapon.name.clone(),
                    damage: weapon.damage(),
                }
            }
            output => {
                let Some(item) = output.item() else {
                    return Err(CraftError::UnknownRecipe(recipe.key.clone()));
                };
                let name = item.name().to_owned();
                self.inventory.add(item).map_err(|(err, _)| err)?;
                CraftOutcome::Crafted(name)
            }
        };

        self.materials.consume(&recipe.ingredients)?;
        tracing::info!(recipe = %recipe.key, ?outcome, "crafted");
        Ok(outcome)
    }
}
