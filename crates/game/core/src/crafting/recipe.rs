//! Recipes and the crafting table loaded from content.

use std::collections::BTreeMap;

use super::material::{Material, Materials};
use crate::items::{Gear, Item, Potion, Rarity, WeaponType};

/// What a recipe produces.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecipeOutput {
    Weapon {
        name: String,
        weapon_type: WeaponType,
        damage: f64,
        value: u32,
    },
    Potion {
        name: String,
        effect_type: String,
        effect_value: f64,
        value: u32,
    },
    /// Sharpen the weapon in the main hand.
    Upgrade { damage: f64 },
}

impl RecipeOutput {
    /// The item this output builds, `None` for upgrades.
    pub fn item(&self) -> Option<Item> {
        match self {
            Self::Weapon {
                name,
                weapon_type,
                damage,
                value,
            } => Some(
                Gear::weapon(name.clone(), *weapon_type, *damage)
                    .with_value(*value)
                    .with_description("A crafted weapon")
                    .into(),
            ),
            Self::Potion {
                name,
                effect_type,
                effect_value,
                value,
            } => Some(
                Potion {
                    name: name.clone(),
                    description: format!("A brewed {effect_type} potion"),
                    value: *value,
                    rarity: Rarity::Common,
                    effect_type: effect_type.clone(),
                    effect_value: *effect_value,
                }
                .into(),
            ),
            Self::Upgrade { .. } => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recipe {
    pub key: String,
    pub name: String,
    /// Material key to count.
    pub ingredients: BTreeMap<String, u32>,
    pub output: RecipeOutput,
}

impl Recipe {
    pub fn can_craft(&self, materials: &Materials) -> bool {
        materials.check(&self.ingredients).is_ok()
    }
}

/// Materials and recipes known to the game.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CraftingTable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: Vec<Material>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub recipes: Vec<Recipe>,
}

impl CraftingTable {
    pub fn material(&self, key: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.key == key)
    }

    pub fn recipe(&self, key: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.key == key)
    }

    /// Recipes the stock covers, in table order.
    pub fn craftable<'a>(&'a self, materials: &'a Materials) -> impl Iterator<Item = &'a Recipe> {
        self.recipes
            .iter()
            .filter(move |recipe| recipe.can_craft(materials))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::items::PotionEffect;

    pub(crate) fn iron_sword() -> Recipe {
        Recipe {
            key: "iron_sword".into(),
            name: "Iron Sword".into(),
            ingredients: [("iron_ingot".to_owned(), 3), ("wood".to_owned(), 1)].into(),
            output: RecipeOutput::Weapon {
                name: "Iron Sword".into(),
                weapon_type: WeaponType::Sword,
                damage: 6.0,
                value: 60,
            },
        }
    }

    pub(crate) fn whetstone() -> Recipe {
        Recipe {
            key: "weapon_upgrade_1".into(),
            name: "Upgrade +1".into(),
            ingredients: [("smithing_stone".to_owned(), 1)].into(),
            output: RecipeOutput::Upgrade { damage: 1.0 },
        }
    }

    #[test]
    fn outputs_build_items() {
        let Some(Item::Gear(sword)) = iron_sword().output.item() else {
            panic!("weapon recipe should build gear");
        };
        assert_eq!(sword.damage(), 6.0);
        assert_eq!(sword.value, 60);

        let brew = RecipeOutput::Potion {
            name: "Health Potion".into(),
            effect_type: "heal".into(),
            effect_value: 30.0,
            value: 25,
        };
        let Some(Item::Potion(potion)) = brew.item() else {
            panic!("potion recipe should build a potion");
        };
        assert_eq!(potion.effect(), Some(PotionEffect::Heal));
        assert!(whetstone().output.item().is_none());
    }

    #[test]
    fn craftable_filters_by_stock() {
        let table = CraftingTable {
            materials: Vec::new(),
            recipes: vec![iron_sword(), whetstone()],
        };
        let mut stock = Materials::new();
        stock.add("smithing_stone", 1);

        let keys: Vec<&str> = table.craftable(&stock).map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["weapon_upgrade_1"]);
        assert!(table.recipe("iron_sword").is_some());
        assert!(table.material("iron_ore").is_none());
    }
}
