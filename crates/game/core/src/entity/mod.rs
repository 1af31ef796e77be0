//! Combatants.
//!
//! [`Entity`] holds what every combatant shares: a stat block, active status
//! effects and resistances. [`Player`] and [`Enemy`] wrap it and add their own
//! fields instead of overriding behaviour.

pub mod enemy;
pub mod player;

pub use enemy::{Enemy, EnemyRoster, EnemyTemplate};
pub use player::{
    ConsumableError, CraftOutcome, DifficultySnapshot, EquipOutcome, Player, PotionOutcome,
    TradeError,
};

use crate::env::RngOracle;
use crate::stats::{Drain, Layer, StatBlock, StatName};
use crate::status::{EffectKind, Insertion, Resistances, StatusEffect, StatusEffects};

/// Result of trying to apply a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// New effect; its apply hook ran.
    Applied,
    /// Same-named effect extended.
    Refreshed,
    /// Resistance roll failed.
    Resisted,
}

/// One entry of a status tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Total DOT damage dealt this tick.
    pub damage: f64,
    /// Names of effects that expired.
    pub expired: Vec<&'static str>,
}

/// Shared combatant state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub name: String,
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: StatusEffects,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Resistances,
    /// Cleared by control effects; restored when they wear off.
    #[cfg_attr(feature = "serde", serde(default = "default_can_act"))]
    pub can_act: bool,
}

#[cfg(feature = "serde")]
const fn default_can_act() -> bool {
    true
}

impl Entity {
    pub fn new(name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            stats,
            status: StatusEffects::new(),
            resistances: Resistances::default(),
            can_act: true,
        }
    }

    /// Alive while the hp pool (permanent plus temporary) is positive.
    pub fn is_alive(&self) -> bool {
        self.stats.pool(crate::stats::ResourceKind::Hp) > 0.0
    }

    pub fn take_damage(&mut self, amount: f64) -> Drain {
        self.stats.take_damage(amount)
    }

    pub fn heal(&mut self, amount: f64) -> f64 {
        self.stats.heal(amount)
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    /// Roll against resistance and apply or refresh the effect.
    ///
    /// # Formula
    ///
    /// Success when `roll * 100 < 100 - resistance`. Effects with no matching
    /// resistance roll against zero.
    pub fn try_apply_status(&mut self, effect: StatusEffect, rng: &mut dyn RngOracle) -> ApplyOutcome {
        let resistance = effect
            .kind
            .resistance()
            .map(|kind| self.resistances.get(kind))
            .unwrap_or(0.0);

        if rng.next_f64() * 100.0 >= 100.0 - resistance {
            tracing::debug!(entity = %self.name, effect = effect.name(), resistance, "status resisted");
            return ApplyOutcome::Resisted;
        }

        // Instant effects run their hook and never occupy a slot.
        if effect.is_expired() {
            self.run_apply_hook(effect.kind);
            return ApplyOutcome::Applied;
        }

        match self.status.insert_or_refresh(effect) {
            Insertion::Added => {
                self.run_apply_hook(effect.kind);
                tracing::debug!(entity = %self.name, effect = effect.name(), duration = effect.duration, "status applied");
                ApplyOutcome::Applied
            }
            Insertion::Refreshed => ApplyOutcome::Refreshed,
            Insertion::Full => {
                tracing::warn!(entity = %self.name, effect = effect.name(), "status list full, effect dropped");
                ApplyOutcome::Resisted
            }
        }
    }

    fn run_apply_hook(&mut self, kind: EffectKind) {
        match kind {
            EffectKind::Freeze => self.can_act = false,
            EffectKind::FireResistance => {
                self.resistances.add(crate::status::ResistanceKind::Burn, 1.0)
            }
            EffectKind::AttackBoost { amount } => {
                self.stats.modify_stat(StatName::Attack, amount, Layer::Temporary)
            }
            EffectKind::DefenseBoost { amount } => {
                self.stats.modify_stat(StatName::Defense, amount, Layer::Temporary)
            }
            EffectKind::LuckBoost { amount } => {
                self.stats.modify_stat(StatName::Luck, amount, Layer::Temporary)
            }
            EffectKind::Healing { amount } => {
                self.stats.heal(amount);
            }
            EffectKind::Poison { .. } | EffectKind::Burn { .. } => {}
        }
    }

    /// Tick every active effect once: DOT damage, then duration - 1.
    ///
    /// DOT damage bypasses temporary hp. Expired effects are removed, and
    /// `can_act` comes back once no control effect remains.
    pub fn process_status_effects(&mut self) -> TickReport {
        let mut damage = 0.0;
        let mut dots = Vec::new();
        for effect in self.status.iter_mut() {
            let dot = effect.kind.damage_per_turn();
            if dot > 0.0 {
                dots.push(dot);
            }
            effect.duration -= 1;
        }
        for dot in dots {
            damage += self.stats.drain_permanent_hp(dot);
        }

        let expired = self.status.remove_expired();
        for name in &expired {
            tracing::debug!(entity = %self.name, effect = name, "status expired");
        }
        if !self.status.iter().any(|e| e.kind == EffectKind::Freeze) {
            self.can_act = true;
        }

        TickReport { damage, expired }
    }
}
