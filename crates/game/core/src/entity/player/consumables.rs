use super::Player;
use crate::entity::{ApplyOutcome, Enemy};
use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::items::{InventoryError, Item, PotionEffect};
use crate::progression::objective;
use crate::skills::{Spell, SpellError, SpellReport};
use crate::status::StatusEffect;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConsumableError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Spell(#[from] SpellError),
}

impl GameError for ConsumableError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Inventory(err) => err.severity(),
            Self::Spell(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Inventory(err) => err.error_code(),
            Self::Spell(err) => err.error_code(),
        }
    }
}

/// What drinking a potion did.
#[derive(Clone, Debug, PartialEq)]
pub enum PotionOutcome {
    Healed(f64),
    Status {
        effect: &'static str,
        outcome: ApplyOutcome,
    },
    /// Unknown effect type; the potion is still used up.
    NoEffect,
}

impl Player {
    /// Drink the potion at `index`.
    ///
    /// Healing is immediate. Buff potions apply their status effect with the
    /// potion's value as duration. The potion is consumed either way.
    ///
    /// # Errors
    ///
    /// [`InventoryError::NoSuchSlot`] or [`InventoryError::WrongKind`]; the
    /// inventory is left unchanged.
    pub fn use_potion(
        &mut self,
        index: usize,
        rng: &mut dyn RngOracle,
    ) -> Result<PotionOutcome, InventoryError> {
        match self.inventory.get(index) {
            Some(Item::Potion(_)) => {}
            Some(_) => {
                return Err(InventoryError::WrongKind {
                    index,
                    expected: "a potion",
                });
            }
            None => return Err(InventoryError::NoSuchSlot { index }),
        }
        let Item::Potion(potion) = self.inventory.remove(index)? else {
            return Err(InventoryError::WrongKind {
                index,
                expected: "a potion",
            });
        };

        let duration = potion.effect_value.floor() as i32;
        let template = match potion.effect() {
            Some(PotionEffect::Heal) => None,
            Some(PotionEffect::AttackBoost) => Some(StatusEffect::attack_boost()),
            Some(PotionEffect::DefenseBoost) => Some(StatusEffect::defense_boost()),
            Some(PotionEffect::LuckBoost) => Some(StatusEffect::luck_boost()),
            Some(PotionEffect::FireResistance) => Some(StatusEffect::fire_resistance()),
            None => {
                tracing::warn!(potion = %potion.name, effect = %potion.effect_type, "unknown potion effect");
                self.update_quests(objective::USE_POTIONS, 1);
                return Ok(PotionOutcome::NoEffect);
            }
        };

        let outcome = match template {
            None => PotionOutcome::Healed(self.entity.heal(potion.effect_value)),
            Some(template) => {
                let effect = StatusEffect::new(template.kind, duration);
                PotionOutcome::Status {
                    effect: effect.name(),
                    outcome: self.entity.try_apply_status(effect, rng),
                }
            }
        };
        tracing::debug!(potion = %potion.name, ?outcome, "potion used");

        self.update_quests(objective::USE_POTIONS, 1);
        Ok(outcome)
    }

    /// Add a spell to the spellbook. Names are compared case-insensitively.
    pub fn learn_spell(&mut self, spell: Spell) -> bool {
        if self.spells.iter().any(|known| known.name.eq_ignore_ascii_case(&spell.name)) {
            return false;
        }
        tracing::info!(player = %self.entity.name, spell = %spell.name, "spell learned");
        self.spells.push(spell);
        true
    }

    /// Cast a known spell by name, ignoring case.
    ///
    /// # Errors
    ///
    /// [`SpellError::UnknownSpell`] when the spell is not in the spellbook,
    /// otherwise whatever [`Spell::cast`] reports.
    pub fn cast_spell(
        &mut self,
        name: &str,
        targets: &mut [Enemy],
        rng: &mut dyn RngOracle,
    ) -> Result<SpellReport, SpellError> {
        let Some(spell) = self.spells.iter().find(|s| s.name.eq_ignore_ascii_case(name)) else {
            return Err(SpellError::UnknownSpell(name.to_owned()));
        };
        spell.cast(&mut self.entity, targets, rng)
    }

    /// Read the scroll at `index`. It is destroyed only if the cast succeeds.
    pub fn use_scroll(
        &mut self,
        index: usize,
        targets: &mut [Enemy],
        rng: &mut dyn RngOracle,
    ) -> Result<SpellReport, ConsumableError> {
        let report = match self.inventory.get(index) {
            Some(Item::Scroll(scroll)) => scroll.spell.cast(&mut self.entity, targets, rng)?,
            Some(_) => {
                return Err(InventoryError::WrongKind {
                    index,
                    expected: "a scroll",
                }
                .into());
            }
            None => return Err(InventoryError::NoSuchSlot { index }.into()),
        };
        self.inventory.remove(index)?;
        Ok(report)
    }

    /// Put a found item in the inventory.
    ///
    /// # Errors
    ///
    /// Hands the item back when the inventory is full.
    pub fn pick_up(&mut self, item: impl Into<Item>) -> Result<(), (InventoryError, Item)> {
        self.inventory.add(item)?;
        self.update_quests(objective::FIND_ITEMS, 1);
        Ok(())
    }
}
