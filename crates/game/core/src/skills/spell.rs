//! Mana-gated spells.
//!
//! A spell pairs a mana cost with a [`SpellEffect`]. Effects are plain data, so
//! spells load from content files and round-trip through saves; the behaviour
//! lives in [`Spell::cast`].

use crate::entity::{ApplyOutcome, Enemy, Entity};
use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{Layer, ResourceKind, StatName};
use crate::status::{EffectKind, StatusEffect};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SpellError {
    #[error("not enough mana to cast {spell}: need {needed}, have {available}")]
    NotEnoughMana {
        spell: String,
        needed: f64,
        available: f64,
    },

    #[error("{0} needs a living target")]
    NoTarget(String),

    #[error("unknown spell: {0}")]
    UnknownSpell(String),
}

impl GameError for SpellError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughMana { .. } | Self::NoTarget(_) => ErrorSeverity::Recoverable,
            Self::UnknownSpell(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughMana { .. } => "SPELL_NOT_ENOUGH_MANA",
            Self::NoTarget(_) => "SPELL_NO_TARGET",
            Self::UnknownSpell(_) => "SPELL_UNKNOWN",
        }
    }
}

/// What a spell does once paid for. The payload is the effect strength.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    /// Damage, then a Burn attempt.
    BurnDamage(f64),
    /// Damage, then a Freeze attempt.
    Freeze(f64),
    Heal(f64),
    Shock(f64),
    /// Temporary hp and max hp on the caster.
    Shield(f64),
    /// Damage to every living enemy.
    AreaDamage(f64),
    Knockback(f64),
    /// Freeze for `n / 6 + 1` turns, no damage.
    Immobilize(f64),
    HolyDamage(f64),
    /// Moves up to `n` mana from the target to the caster.
    ManaDrain(f64),
}

impl SpellEffect {
    /// Whether the effect needs a living enemy.
    pub const fn needs_target(&self) -> bool {
        !matches!(self, Self::Heal(_) | Self::Shield(_))
    }
}

/// Summary of one cast for presentation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpellReport {
    /// Damage reported against enemies (absorbed plus applied).
    pub damage: f64,
    pub healed: f64,
    pub shielded: f64,
    pub drained: f64,
    pub statuses: Vec<ApplyOutcome>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spell {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub mana_cost: f64,
    pub effect: SpellEffect,
}

impl Spell {
    pub fn new(name: impl Into<String>, mana_cost: f64, effect: SpellEffect) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            mana_cost,
            effect,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Pay the mana cost and resolve the effect.
    ///
    /// Single-target effects hit the first living enemy in `targets`.
    ///
    /// # Errors
    ///
    /// - [`SpellError::NotEnoughMana`] when the caster's drainable mana is short
    /// - [`SpellError::NoTarget`] when the effect needs an enemy and none is alive
    ///
    /// Both leave caster and targets untouched.
    pub fn cast(
        &self,
        caster: &mut Entity,
        targets: &mut [Enemy],
        rng: &mut dyn RngOracle,
    ) -> Result<SpellReport, SpellError> {
        let available = caster.stats.pool(ResourceKind::Mana);
        if available < self.mana_cost {
            return Err(SpellError::NotEnoughMana {
                spell: self.name.clone(),
                needed: self.mana_cost,
                available,
            });
        }
        let primary = targets.iter().position(Enemy::is_alive);
        if self.effect.needs_target() && primary.is_none() {
            return Err(SpellError::NoTarget(self.name.clone()));
        }

        caster.stats.use_mana(self.mana_cost);
        tracing::debug!(caster = %caster.name, spell = %self.name, "spell cast");

        let mut report = SpellReport::default();
        match self.effect {
            SpellEffect::BurnDamage(n) => {
                if let Some(enemy) = primary.and_then(|index| targets.get_mut(index)) {
                    report.damage += enemy.entity.take_damage(n).total();
                    report.statuses.push(enemy.entity.try_apply_status(StatusEffect::burn(), rng));
                }
            }
            SpellEffect::Freeze(n) => {
                if let Some(enemy) = primary.and_then(|index| targets.get_mut(index)) {
                    report.damage += enemy.entity.take_damage(n).total();
                    report.statuses.push(enemy.entity.try_apply_status(StatusEffect::freeze(), rng));
                }
            }
            SpellEffect::Shock(n) | SpellEffect::Knockback(n) | SpellEffect::HolyDamage(n) => {
                if let Some(enemy) = primary.and_then(|index| targets.get_mut(index)) {
                    report.damage += enemy.entity.take_damage(n).total();
                }
            }
            SpellEffect::Heal(n) => {
                report.healed = caster.heal(n);
            }
            SpellEffect::Shield(n) => {
                caster.stats.modify_stat(StatName::MaxHp, n, Layer::Temporary);
                caster.stats.modify_stat(StatName::Hp, n, Layer::Temporary);
                report.shielded = n;
            }
            SpellEffect::AreaDamage(n) => {
                for enemy in targets.iter_mut().filter(|enemy| enemy.is_alive()) {
                    report.damage += enemy.entity.take_damage(n).total();
                }
            }
            SpellEffect::Immobilize(n) => {
                if let Some(enemy) = primary.and_then(|index| targets.get_mut(index)) {
                    let duration = (n / 6.0).floor() as i32 + 1;
                    let freeze = StatusEffect::new(EffectKind::Freeze, duration);
                    report.statuses.push(enemy.entity.try_apply_status(freeze, rng));
                }
            }
            SpellEffect::ManaDrain(n) => {
                if let Some(enemy) = primary.and_then(|index| targets.get_mut(index)) {
                    let drained = enemy.entity.stats.spend(ResourceKind::Mana, n).total();
                    caster.stats.regen_mana(drained);
                    report.drained = drained;
                }
            }
        }

        Ok(report)
    }
}
