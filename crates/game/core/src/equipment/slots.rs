//! Worn gear, one item per named slot.

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{ErrorSeverity, GameError};
use crate::items::{ArmorType, Gear, GearKind};

/// Equipment slots.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Slot {
    MainHand,
    OffHand,
    Helmet,
    Chest,
    Gauntlets,
    Leggings,
    Boots,
    Shield,
    Ring,
    Amulet,
    Belt,
}

impl Slot {
    /// Slots that count toward armor set bonuses. The shield never does.
    pub const SET_PIECES: [Slot; 5] = [
        Slot::Helmet,
        Slot::Chest,
        Slot::Gauntlets,
        Slot::Leggings,
        Slot::Boots,
    ];

    /// Fixed armor type to slot mapping.
    pub const fn for_armor(armor_type: ArmorType) -> Self {
        match armor_type {
            ArmorType::Helmet => Slot::Helmet,
            ArmorType::Chestplate => Slot::Chest,
            ArmorType::Gauntlets => Slot::Gauntlets,
            ArmorType::Leggings => Slot::Leggings,
            ArmorType::Boots => Slot::Boots,
            ArmorType::Shield => Slot::Shield,
        }
    }

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("both hands are occupied; unequip a weapon first")]
    HandsFull,

    #[error("{gear} cannot be worn in the {slot} slot")]
    WrongSlot { gear: String, slot: Slot },

    #[error("nothing equipped in the {0} slot")]
    EmptySlot(Slot),

    #[error("inventory has no room for the unequipped item")]
    InventoryFull,

    #[error("inventory slot {0} does not hold wearable gear")]
    NotGear(usize),
}

impl GameError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HandsFull | Self::InventoryFull | Self::EmptySlot(_) => {
                ErrorSeverity::Recoverable
            }
            Self::WrongSlot { .. } | Self::NotGear(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HandsFull => "EQUIP_HANDS_FULL",
            Self::WrongSlot { .. } => "EQUIP_WRONG_SLOT",
            Self::EmptySlot(_) => "EQUIP_EMPTY_SLOT",
            Self::InventoryFull => "EQUIP_INVENTORY_FULL",
            Self::NotGear(_) => "EQUIP_NOT_GEAR",
        }
    }
}

/// Gear currently worn.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    slots: [Option<Gear>; Slot::COUNT],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: Slot) -> Option<&Gear> {
        self.slots[slot.index()].as_ref()
    }

    pub(crate) fn get_mut(&mut self, slot: Slot) -> Option<&mut Gear> {
        self.slots[slot.index()].as_mut()
    }

    pub fn is_occupied(&self, slot: Slot) -> bool {
        self.get(slot).is_some()
    }

    /// Slot a piece of gear would go into right now.
    ///
    /// Weapons take the main hand, then the off hand, and are refused when
    /// both are taken so a worn weapon is never silently replaced.
    ///
    /// # Errors
    ///
    /// [`EquipError::HandsFull`] when a weapon has nowhere to go.
    pub fn resolve_slot(&self, gear: &Gear) -> Result<Slot, EquipError> {
        match gear.kind {
            GearKind::Weapon { .. } => {
                if !self.is_occupied(Slot::MainHand) {
                    Ok(Slot::MainHand)
                } else if !self.is_occupied(Slot::OffHand) {
                    Ok(Slot::OffHand)
                } else {
                    Err(EquipError::HandsFull)
                }
            }
            GearKind::Armor { armor_type } => Ok(Slot::for_armor(armor_type)),
            GearKind::Ring => Ok(Slot::Ring),
            GearKind::Amulet => Ok(Slot::Amulet),
            GearKind::Belt => Ok(Slot::Belt),
        }
    }

    /// Whether `gear` may be worn in `slot`.
    pub fn accepts(slot: Slot, gear: &Gear) -> bool {
        match gear.kind {
            GearKind::Weapon { .. } => matches!(slot, Slot::MainHand | Slot::OffHand),
            GearKind::Armor { armor_type } => Slot::for_armor(armor_type) == slot,
            GearKind::Ring => slot == Slot::Ring,
            GearKind::Amulet => slot == Slot::Amulet,
            GearKind::Belt => slot == Slot::Belt,
        }
    }

    /// Put gear into a slot, returning whatever was there.
    ///
    /// # Errors
    ///
    /// [`EquipError::WrongSlot`] when the slot cannot hold this gear; the gear
    /// is handed back untouched.
    pub fn put(&mut self, slot: Slot, gear: Gear) -> Result<Option<Gear>, (EquipError, Gear)> {
        if !Self::accepts(slot, &gear) {
            let err = EquipError::WrongSlot {
                gear: gear.name.clone(),
                slot,
            };
            return Err((err, gear));
        }
        Ok(self.slots[slot.index()].replace(gear))
    }

    /// Return gear to the slot it was taken from, skipping the slot check.
    pub(crate) fn restore(&mut self, slot: Slot, gear: Gear) {
        self.slots[slot.index()] = Some(gear);
    }

    pub fn take(&mut self, slot: Slot) -> Option<Gear> {
        self.slots[slot.index()].take()
    }

    /// Occupied slots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Gear)> {
        Slot::iter().filter_map(move |slot| self.get(slot).map(|gear| (slot, gear)))
    }

    /// Damage of the main-hand and off-hand weapons.
    pub fn weapon_damage(&self) -> (f64, f64) {
        let damage = |slot| self.get(slot).map(Gear::damage).unwrap_or(0.0);
        (damage(Slot::MainHand), damage(Slot::OffHand))
    }

    pub fn drain(&mut self) -> Vec<Gear> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::WeaponType;

    #[test]
    fn weapons_fill_main_then_off_then_refuse() {
        let mut equipment = Equipment::new();
        let sword = Gear::weapon("Sword", WeaponType::Sword, 10.0);

        let slot = equipment.resolve_slot(&sword).unwrap();
        assert_eq!(slot, Slot::MainHand);
        equipment.put(slot, sword.clone()).unwrap();

        let slot = equipment.resolve_slot(&sword).unwrap();
        assert_eq!(slot, Slot::OffHand);
        equipment.put(slot, sword.clone()).unwrap();

        assert_eq!(equipment.resolve_slot(&sword), Err(EquipError::HandsFull));
    }

    #[test]
    fn armor_maps_by_type() {
        let equipment = Equipment::new();
        let chest = Gear::armor("Plate", ArmorType::Chestplate, 5.0);
        let shield = Gear::armor("Buckler", ArmorType::Shield, 3.0);
        assert_eq!(equipment.resolve_slot(&chest), Ok(Slot::Chest));
        assert_eq!(equipment.resolve_slot(&shield), Ok(Slot::Shield));
    }

    #[test]
    fn put_rejects_wrong_slot_and_returns_gear() {
        let mut equipment = Equipment::new();
        let boots = Gear::armor("Boots", ArmorType::Boots, 1.0);
        let (err, gear) = equipment.put(Slot::Helmet, boots).unwrap_err();
        assert_eq!(err.error_code(), "EQUIP_WRONG_SLOT");
        assert_eq!(gear.name, "Boots");
        assert!(!equipment.is_occupied(Slot::Helmet));
    }

    #[test]
    fn put_returns_previous_occupant() {
        let mut equipment = Equipment::new();
        let old = Gear::armor("Old Helmet", ArmorType::Helmet, 1.0);
        let new = Gear::armor("New Helmet", ArmorType::Helmet, 2.0);
        assert_eq!(equipment.put(Slot::Helmet, old).unwrap(), None);
        let previous = equipment.put(Slot::Helmet, new).unwrap();
        assert_eq!(previous.map(|g| g.name), Some("Old Helmet".to_string()));
    }
}
