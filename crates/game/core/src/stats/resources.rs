//! Resource pools layered on top of the stat block.
//!
//! Hp, mana and stamina each have a permanent part and a temporary part.
//!
//! - Spending (damage, costs) drains temporary first, then permanent.
//! - Restoring (healing, regen) fills permanent first, then temporary, each
//!   capped by its own layer's maximum.
//!
//! Neither part is ever driven below zero.

use super::block::StatBlock;
use super::name::{Layer, StatName};

// ============================================================================
// Resource Kind
// ============================================================================

/// Enum representing individual resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResourceKind {
    Hp,
    Mana,
    Stamina,
}

impl ResourceKind {
    /// Stat holding the current amount.
    pub const fn current(self) -> StatName {
        match self {
            Self::Hp => StatName::Hp,
            Self::Mana => StatName::Mana,
            Self::Stamina => StatName::Stamina,
        }
    }

    /// Stat holding the cap.
    pub const fn maximum(self) -> StatName {
        match self {
            Self::Hp => StatName::MaxHp,
            Self::Mana => StatName::MaxMana,
            Self::Stamina => StatName::MaxStamina,
        }
    }
}

/// Split of a drain between the temporary and permanent pools.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Drain {
    /// Amount taken from the permanent pool.
    pub applied: f64,
    /// Amount taken from the temporary pool.
    pub absorbed: f64,
}

impl Drain {
    /// Everything the drain removed, shield included.
    pub fn total(&self) -> f64 {
        self.applied + self.absorbed
    }
}

// ============================================================================
// Pool Operations
// ============================================================================

impl StatBlock {
    /// Permanent plus temporary amount of a resource.
    pub fn pool(&self, kind: ResourceKind) -> f64 {
        let stat = kind.current();
        self.permanent(stat) + self.temporary(stat)
    }

    /// Drain a resource, temporary part first.
    ///
    /// # Returns
    ///
    /// How much came out of each part. `applied + absorbed` equals
    /// `min(amount, pool)` for non-negative pools.
    pub fn spend(&mut self, kind: ResourceKind, amount: f64) -> Drain {
        let amount = amount.max(0.0);
        let stat = kind.current();

        let temp = self.temporary(stat).max(0.0);
        let absorbed = amount.min(temp);
        self.layer_mut(Layer::Temporary)[stat] -= absorbed;

        let remaining = amount - absorbed;
        let perm = self.permanent(stat).max(0.0);
        let applied = remaining.min(perm);
        self.layer_mut(Layer::Permanent)[stat] = perm - applied;

        self.recompute_total();
        Drain { applied, absorbed }
    }

    /// Refill a resource, permanent part first.
    ///
    /// # Returns
    ///
    /// The amount actually restored across both parts.
    pub fn restore(&mut self, kind: ResourceKind, amount: f64) -> f64 {
        let mut amount = amount.max(0.0);
        let (stat, cap) = (kind.current(), kind.maximum());

        let perm_room = (self.permanent(cap) - self.permanent(stat)).max(0.0);
        let to_perm = amount.min(perm_room);
        self.layer_mut(Layer::Permanent)[stat] += to_perm;
        amount -= to_perm;

        let mut to_temp = 0.0;
        if amount > 0.0 {
            let temp_room = (self.temporary(cap) - self.temporary(stat)).max(0.0);
            to_temp = amount.min(temp_room);
            self.layer_mut(Layer::Temporary)[stat] += to_temp;
        }

        self.recompute_total();
        to_perm + to_temp
    }

    /// Apply damage through the temporary hp shield.
    pub fn take_damage(&mut self, amount: f64) -> Drain {
        self.spend(ResourceKind::Hp, amount)
    }

    /// Reduce permanent hp directly, skipping the temporary shield.
    ///
    /// Used by damage-over-time effects. Returns the damage dealt.
    pub fn drain_permanent_hp(&mut self, amount: f64) -> f64 {
        let perm = self.permanent(StatName::Hp).max(0.0);
        let dealt = amount.max(0.0).min(perm);
        self.layer_mut(Layer::Permanent)[StatName::Hp] = perm - dealt;
        self.recompute_total();
        dealt
    }

    pub fn heal(&mut self, amount: f64) -> f64 {
        self.restore(ResourceKind::Hp, amount)
    }

    pub fn use_mana(&mut self, amount: f64) -> Drain {
        self.spend(ResourceKind::Mana, amount)
    }

    pub fn regen_mana(&mut self, amount: f64) -> f64 {
        self.restore(ResourceKind::Mana, amount)
    }

    pub fn use_stamina(&mut self, amount: f64) -> Drain {
        self.spend(ResourceKind::Stamina, amount)
    }

    pub fn rest_stamina(&mut self, amount: f64) -> f64 {
        self.restore(ResourceKind::Stamina, amount)
    }

    /// Top every pool up to its permanent maximum.
    pub fn restore_all(&mut self) {
        for kind in [ResourceKind::Hp, ResourceKind::Mana, ResourceKind::Stamina] {
            let (stat, cap) = (kind.current(), kind.maximum());
            let max = self.permanent(cap);
            self.layer_mut(Layer::Permanent)[stat] = max;
        }
        self.recompute_total();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shielded(temp_hp: f64) -> StatBlock {
        let mut block = StatBlock::new();
        block.modify_stat(StatName::MaxHp, temp_hp, Layer::Temporary);
        block.modify_stat(StatName::Hp, temp_hp, Layer::Temporary);
        block
    }

    #[test]
    fn damage_hits_shield_first() {
        let mut block = shielded(15.0);
        let drain = block.take_damage(20.0);
        assert_eq!(drain.absorbed, 15.0);
        assert_eq!(drain.applied, 5.0);
        assert_eq!(block.temporary(StatName::Hp), 0.0);
        assert_eq!(block.permanent(StatName::Hp), 95.0);
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut block = StatBlock::with_base(10.0, 10.0, 1.0, 0.0);
        let drain = block.take_damage(500.0);
        assert_eq!(drain.total(), 10.0);
        assert_eq!(block.get(StatName::Hp), 0.0);
    }

    #[test]
    fn heal_fills_permanent_before_temporary() {
        let mut block = shielded(20.0);
        block.take_damage(40.0);
        // shield 0/20, permanent 80/100
        let healed = block.heal(15.0);
        assert_eq!(healed, 15.0);
        assert_eq!(block.permanent(StatName::Hp), 95.0);
        assert_eq!(block.temporary(StatName::Hp), 0.0);

        let healed = block.heal(100.0);
        assert_eq!(healed, 25.0);
        assert_eq!(block.permanent(StatName::Hp), 100.0);
        assert_eq!(block.temporary(StatName::Hp), 20.0);
    }

    #[test]
    fn mana_spend_and_regen_are_asymmetric() {
        let mut block = StatBlock::new();
        block.modify_stat(StatName::MaxMana, 10.0, Layer::Temporary);
        block.modify_stat(StatName::Mana, 10.0, Layer::Temporary);

        let drain = block.use_mana(12.0);
        assert_eq!(drain.absorbed, 10.0);
        assert_eq!(drain.applied, 2.0);

        block.regen_mana(5.0);
        assert_eq!(block.permanent(StatName::Mana), 20.0);
        assert_eq!(block.temporary(StatName::Mana), 3.0);
    }

    #[test]
    fn dot_drain_skips_shield() {
        let mut block = shielded(10.0);
        let dealt = block.drain_permanent_hp(8.0);
        assert_eq!(dealt, 8.0);
        assert_eq!(block.temporary(StatName::Hp), 10.0);
        assert_eq!(block.permanent(StatName::Hp), 92.0);
    }

    proptest! {
        #[test]
        fn damage_accounting(temp in 0.0f64..50.0, perm in 0.0f64..100.0, dmg in 0.0f64..300.0) {
            let mut block = shielded(temp);
            block.set_stat(StatName::Hp, perm, Layer::Permanent);
            let before = block.pool(ResourceKind::Hp);
            let drain = block.take_damage(dmg);
            prop_assert!((drain.total() - dmg.min(before)).abs() < 1e-9);
            prop_assert!(block.get(StatName::Hp) >= 0.0);
        }

        #[test]
        fn pools_stay_within_bounds(
            ops in prop::collection::vec((any::<bool>(), 0.0f64..40.0), 1..60)
        ) {
            let mut block = StatBlock::new();
            block.modify_stat(StatName::MaxStamina, 15.0, Layer::Temporary);
            let cap = block.permanent(StatName::MaxStamina) + block.temporary(StatName::MaxStamina);
            for (spend, amount) in ops {
                if spend {
                    block.use_stamina(amount);
                } else {
                    block.rest_stamina(amount);
                }
                let pool = block.pool(ResourceKind::Stamina);
                prop_assert!(pool >= 0.0);
                prop_assert!(pool <= cap + 1e-9);
            }
        }
    }
}
