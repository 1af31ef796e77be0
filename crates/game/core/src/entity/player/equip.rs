use std::collections::BTreeSet;

use super::Player;
use crate::equipment::{ActiveSetBonus, ArmorSetTable, EquipError, Slot};
use crate::items::{Gear, Item};
use crate::stats::Layer;

/// Result of a successful equip.
#[derive(Clone, Debug, PartialEq)]
pub struct EquipOutcome {
    pub slot: Slot,
    /// Name of the piece moved back into the inventory, if the slot was taken.
    pub unequipped: Option<String>,
    /// Set bonuses reached for the first time with this loadout.
    pub announced: Vec<ActiveSetBonus>,
}

impl Player {
    /// Wear a piece of gear in the slot it resolves to.
    ///
    /// An occupant of that slot moves back to the inventory.
    ///
    /// # Errors
    ///
    /// - [`EquipError::HandsFull`] for a weapon when both hands are taken
    /// - [`EquipError::InventoryFull`] when the occupant has nowhere to go
    ///
    /// The gear is handed back with the error and nothing changes.
    pub fn equip(
        &mut self,
        gear: Gear,
        sets: &ArmorSetTable,
    ) -> Result<EquipOutcome, (EquipError, Gear)> {
        let slot = match self.equipment.resolve_slot(&gear) {
            Ok(slot) => slot,
            Err(err) => {
                tracing::debug!(item = %gear.name, %err, "equip refused");
                return Err((err, gear));
            }
        };

        let mut unequipped = None;
        if let Some(previous) = self.equipment.take(slot) {
            let name = previous.name.clone();
            if let Err((_, Item::Gear(previous))) = self.inventory.add(previous) {
                self.equipment.restore(slot, previous);
                return Err((EquipError::InventoryFull, gear));
            }
            unequipped = Some(name);
        }

        if let Err((err, gear)) = self.equipment.put(slot, gear) {
            tracing::error!(%slot, %err, "resolved slot rejected gear");
            return Err((err, gear));
        }

        let announced = self.refresh_equipment(sets);
        Ok(EquipOutcome {
            slot,
            unequipped,
            announced,
        })
    }

    /// Equip the gear at `index` in the inventory.
    ///
    /// # Errors
    ///
    /// [`EquipError::NotGear`] when the slot is empty or holds a consumable,
    /// otherwise as [`Self::equip`]. On failure the item stays where it was.
    pub fn equip_from_inventory(
        &mut self,
        index: usize,
        sets: &ArmorSetTable,
    ) -> Result<EquipOutcome, EquipError> {
        if self.inventory.get(index).and_then(Item::as_gear).is_none() {
            return Err(EquipError::NotGear(index));
        }
        let Ok(Item::Gear(gear)) = self.inventory.remove(index) else {
            return Err(EquipError::NotGear(index));
        };

        self.equip(gear, sets).map_err(|(err, gear)| {
            self.inventory.reinsert(index, Item::Gear(gear));
            err
        })
    }

    /// Move the gear in `slot` back to the inventory.
    ///
    /// # Errors
    ///
    /// - [`EquipError::EmptySlot`] when nothing is worn there
    /// - [`EquipError::InventoryFull`] when the inventory is at its limit
    pub fn unequip(&mut self, slot: Slot, sets: &ArmorSetTable) -> Result<String, EquipError> {
        if !self.equipment.is_occupied(slot) {
            tracing::warn!(%slot, "nothing to unequip");
            return Err(EquipError::EmptySlot(slot));
        }
        if self.inventory.is_full() {
            return Err(EquipError::InventoryFull);
        }
        let Some(gear) = self.equipment.take(slot) else {
            return Err(EquipError::EmptySlot(slot));
        };

        let name = gear.name.clone();
        if let Err((err, Item::Gear(gear))) = self.inventory.add(gear) {
            tracing::error!(%slot, %err, "inventory refused unequipped gear");
            self.equipment.restore(slot, gear);
            return Err(EquipError::InventoryFull);
        }
        self.refresh_equipment(sets);
        Ok(name)
    }

    /// Rebuild the equipment layer from worn gear and set bonuses.
    ///
    /// Resets the temporary and equipment layers, sums gear effects and
    /// unlocked set tiers into the equipment layer, then recomputes totals.
    /// Returns bonuses that were not active before this call.
    pub fn refresh_equipment(&mut self, sets: &ArmorSetTable) -> Vec<ActiveSetBonus> {
        let stats = &mut self.entity.stats;
        stats.reset_temporary();
        stats.reset_equipment();

        let aggregate = sets.aggregate(&self.equipment);
        for (stat, value) in &aggregate.effects {
            stats.modify_stat_named(stat, *value, Layer::Equipment);
        }
        stats.recompute_total();

        let active: BTreeSet<String> = aggregate.active.iter().map(bonus_key).collect();
        let announced: Vec<ActiveSetBonus> = aggregate
            .active
            .iter()
            .filter(|bonus| !self.seen_set_bonuses.contains(&bonus_key(bonus)))
            .cloned()
            .collect();
        for bonus in &announced {
            tracing::info!(set = %bonus.set, bonus = %bonus.bonus, pieces = bonus.threshold, "set bonus active");
        }

        self.seen_set_bonuses = active;
        self.active_set_bonuses = aggregate.active.into_iter().map(|bonus| bonus.bonus).collect();
        announced
    }
}

fn bonus_key(bonus: &ActiveSetBonus) -> String {
    format!("{}:{}", bonus.set, bonus.bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::player::tests::hero;
    use crate::equipment::sets::tests::{brigand, piece};
    use crate::items::{ArmorType, Inventory, Potion, PotionEffect, WeaponType};
    use crate::stats::StatName;

    fn table() -> ArmorSetTable {
        ArmorSetTable::new(vec![brigand()])
    }

    #[test]
    fn armor_moves_into_its_slot_and_layer() {
        let sets = table();
        let mut player = hero();
        let outcome = player
            .equip(Gear::armor("Iron Helmet", ArmorType::Helmet, 4.0), &sets)
            .unwrap();
        assert_eq!(outcome.slot, Slot::Helmet);
        assert_eq!(player.entity.stats.equipment(StatName::Defense), 4.0);
        assert_eq!(player.stat(StatName::Defense), 9.0);
    }

    #[test]
    fn occupant_returns_to_inventory() {
        let sets = table();
        let mut player = hero();
        player.equip(Gear::armor("Old Boots", ArmorType::Boots, 1.0), &sets).unwrap();
        let outcome = player
            .equip(Gear::armor("New Boots", ArmorType::Boots, 3.0), &sets)
            .unwrap();
        assert_eq!(outcome.unequipped.as_deref(), Some("Old Boots"));
        assert!(player.inventory.position("Old Boots").is_some());
        assert_eq!(player.entity.stats.equipment(StatName::Defense), 3.0);
    }

    #[test]
    fn third_weapon_is_refused_and_returned() {
        let sets = table();
        let mut player = hero();
        player.equip(Gear::weapon("A", WeaponType::Sword, 1.0), &sets).unwrap();
        player.equip(Gear::weapon("B", WeaponType::Sword, 1.0), &sets).unwrap();
        let (err, gear) = player
            .equip(Gear::weapon("C", WeaponType::Sword, 1.0), &sets)
            .unwrap_err();
        assert_eq!(err, EquipError::HandsFull);
        assert_eq!(gear.name, "C");
    }

    #[test]
    fn unequip_and_reequip_is_idempotent() {
        let sets = table();
        let mut player = hero();
        for armor_type in [ArmorType::Helmet, ArmorType::Boots] {
            player.equip(piece(armor_type), &sets).unwrap();
        }
        let before = player.entity.stats.clone();

        player.unequip(Slot::Helmet, &sets).unwrap();
        assert!(player.active_set_bonuses.is_empty());
        let index = player.inventory.len() - 1;
        player.equip_from_inventory(index, &sets).unwrap();

        assert_eq!(player.entity.stats, before);
        assert_eq!(player.active_set_bonuses, vec!["quick_strikes".to_string()]);
    }

    #[test]
    fn set_bonus_is_announced_once_per_activation() {
        let sets = table();
        let mut player = hero();
        player.equip(piece(ArmorType::Helmet), &sets).unwrap();
        let second = player.equip(piece(ArmorType::Boots), &sets).unwrap();
        assert_eq!(second.announced.len(), 1);
        assert_eq!(player.stat(StatName::Agility), 10.0);
        assert_eq!(player.stat(StatName::Attack), 8.0);

        let third = player.equip(piece(ArmorType::Leggings), &sets).unwrap();
        assert!(third.announced.is_empty());

        player.unequip(Slot::Leggings, &sets).unwrap();
        player.unequip(Slot::Boots, &sets).unwrap();
        let again = player.equip(piece(ArmorType::Boots), &sets).unwrap();
        assert_eq!(again.announced.len(), 1);
    }

    #[test]
    fn unequip_empty_slot_fails() {
        let mut player = hero();
        assert_eq!(
            player.unequip(Slot::Ring, &table()),
            Err(EquipError::EmptySlot(Slot::Ring))
        );
    }

    #[test]
    fn full_inventory_blocks_unequip_and_swap() {
        let sets = table();
        let mut player = hero();
        player.inventory = Inventory::with_limit(Some(1));
        let _ = player.inventory.add(Potion::new("Tonic", PotionEffect::Heal, 5.0));
        player.equip(Gear::armor("Cap", ArmorType::Helmet, 1.0), &sets).unwrap();

        assert_eq!(player.unequip(Slot::Helmet, &sets), Err(EquipError::InventoryFull));
        let (err, _) = player
            .equip(Gear::armor("Hood", ArmorType::Helmet, 2.0), &sets)
            .unwrap_err();
        assert_eq!(err, EquipError::InventoryFull);
        assert_eq!(player.equipment.get(Slot::Helmet).map(|g| g.name.as_str()), Some("Cap"));
    }

    #[test]
    fn equipping_a_potion_is_rejected_in_place() {
        let mut player = hero();
        assert_eq!(
            player.equip_from_inventory(0, &table()),
            Err(EquipError::NotGear(0))
        );
        assert_eq!(player.inventory.len(), 1);
    }
}
