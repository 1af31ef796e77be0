//! Pure combat formulas.
//!
//! Every probability and cost reads its constants from [`CombatTables`], so
//! balance changes never touch the controller.

use crate::config::CombatTables;
use crate::equipment::{Equipment, Slot};

/// Chance that a basic attack crits.
///
/// Formula: `crit_base + luck * crit_per_luck + critical_chance * crit_per_crit_stat`
pub fn crit_chance(tables: &CombatTables, luck: f64, critical_chance: f64) -> f64 {
    tables.crit_base + luck * tables.crit_per_luck + critical_chance * tables.crit_per_crit_stat
}

/// Formula: `skill_crit_base + luck * skill_crit_per_luck`
pub fn skill_crit_chance(tables: &CombatTables, luck: f64) -> f64 {
    tables.skill_crit_base + luck * tables.skill_crit_per_luck
}

/// Stamina per basic attack: main hand, else off hand, else unarmed.
pub fn stamina_cost(tables: &CombatTables, equipment: &Equipment) -> f64 {
    if equipment.is_occupied(Slot::MainHand) {
        tables.stamina_cost_main_hand
    } else if equipment.is_occupied(Slot::OffHand) {
        tables.stamina_cost_off_hand
    } else {
        tables.stamina_cost_unarmed
    }
}

/// Formula: `flee_base + luck * flee_per_luck`
pub fn flee_chance(tables: &CombatTables, luck: f64) -> f64 {
    tables.flee_base + luck * tables.flee_per_luck
}

/// Formula: `luck * dodge_per_luck + agility * dodge_per_agility`
pub fn dodge_chance(tables: &CombatTables, luck: f64, agility: f64) -> f64 {
    luck * tables.dodge_per_luck + agility * tables.dodge_per_agility
}

/// Damage an enemy hit deals before difficulty scaling.
///
/// Formula: `int(attack * scale / (scale + defense + armor))`
pub fn mitigated_damage(tables: &CombatTables, attack: f64, defense: f64, armor: f64) -> f64 {
    let denominator = tables.mitigation_scale + defense + armor;
    if denominator <= 0.0 {
        return attack.max(0.0).floor();
    }
    (attack * tables.mitigation_scale / denominator).max(0.0).floor()
}

/// Formula: `drop_base + luck * drop_per_luck`
pub fn drop_chance(tables: &CombatTables, luck: f64) -> f64 {
    tables.drop_base + luck * tables.drop_per_luck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Gear, WeaponType};
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn default_probabilities() {
        let t = CombatTables::default();
        assert!(close(crit_chance(&t, 5.0, 5.0), 0.175));
        assert!(close(skill_crit_chance(&t, 5.0), 0.10));
        assert!(close(flee_chance(&t, 5.0), 0.45));
        assert!(close(dodge_chance(&t, 5.0, 5.0), 0.15));
        assert!(close(drop_chance(&t, 5.0), 0.30));
    }

    #[test]
    fn stamina_cost_by_hands() {
        let t = CombatTables::default();
        let mut equipment = Equipment::new();
        assert_eq!(stamina_cost(&t, &equipment), 2.0);
        equipment
            .put(Slot::OffHand, Gear::weapon("Knife", WeaponType::Dagger, 2.0))
            .unwrap();
        assert_eq!(stamina_cost(&t, &equipment), 10.0);
        equipment
            .put(Slot::MainHand, Gear::weapon("Blade", WeaponType::Sword, 5.0))
            .unwrap();
        assert_eq!(stamina_cost(&t, &equipment), 5.0);
    }

    #[test]
    fn mitigation_truncates() {
        let t = CombatTables::default();
        assert_eq!(mitigated_damage(&t, 50.0, 5.0, 0.0), 47.0);
        assert_eq!(mitigated_damage(&t, 10.0, 0.0, 0.0), 10.0);
    }

    proptest! {
        #[test]
        fn mitigation_never_exceeds_attack(
            attack in 0.0f64..10_000.0,
            defense in 0.0f64..1_000.0,
            armor in 0.0f64..1_000.0,
        ) {
            let t = CombatTables::default();
            let damage = mitigated_damage(&t, attack, defense, armor);
            prop_assert!(damage >= 0.0);
            prop_assert!(damage <= attack);
        }
    }
}
