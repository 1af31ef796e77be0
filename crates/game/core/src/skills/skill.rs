//! Resource-gated combat skills.

use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{Layer, ResourceKind, StatName};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SkillError {
    #[error("not enough {resource} for {skill}: need {needed}, have {available}")]
    Insufficient {
        skill: String,
        resource: ResourceKind,
        needed: f64,
        available: f64,
    },

    #[error("no skill at index {0}")]
    UnknownSkill(usize),
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Insufficient { .. } => ErrorSeverity::Recoverable,
            Self::UnknownSkill(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Insufficient { .. } => "SKILL_INSUFFICIENT_RESOURCE",
            Self::UnknownSkill(_) => "SKILL_UNKNOWN",
        }
    }
}

/// Special attack granted by a class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Applied to the caster's total damage. Zero means a pure utility skill.
    pub damage_multiplier: f64,
    /// Added to the caster's temporary layer on activation.
    #[cfg_attr(feature = "serde", serde(default))]
    pub temporary_bonus: BTreeMap<StatName, f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: BTreeMap<ResourceKind, f64>,
}

impl Skill {
    pub fn new(name: impl Into<String>, damage_multiplier: f64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            damage_multiplier,
            temporary_bonus: BTreeMap::new(),
            cost: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, resource: ResourceKind, amount: f64) -> Self {
        self.cost.insert(resource, amount);
        self
    }

    #[must_use]
    pub fn with_bonus(mut self, stat: StatName, amount: f64) -> Self {
        self.temporary_bonus.insert(stat, amount);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check every cost against `actor`'s drainable pools.
    ///
    /// Equipment-layer resources never count toward a cost.
    fn affordable(&self, actor: &Entity) -> Result<(), SkillError> {
        for (&resource, &needed) in &self.cost {
            let available = actor.stats.pool(resource);
            if available < needed {
                return Err(SkillError::Insufficient {
                    skill: self.name.clone(),
                    resource,
                    needed,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Pay the costs, apply temporary bonuses and return the multiplier.
    ///
    /// # Errors
    ///
    /// [`SkillError::Insufficient`] when any cost exceeds the actor's
    /// spendable pool. Nothing is deducted in that case.
    pub fn activate(&self, actor: &mut Entity) -> Result<f64, SkillError> {
        self.affordable(actor)?;

        for (&resource, &amount) in &self.cost {
            actor.stats.spend(resource, amount);
        }
        for (&stat, &bonus) in &self.temporary_bonus {
            actor.stats.modify_stat(stat, bonus, Layer::Temporary);
        }

        tracing::debug!(actor = %actor.name, skill = %self.name, multiplier = self.damage_multiplier, "skill activated");
        Ok(self.damage_multiplier)
    }

    /// [`Self::activate`], collapsing a failure to a zero multiplier.
    pub fn activate_or_zero(&self, actor: &mut Entity) -> f64 {
        self.activate(actor).unwrap_or_else(|err| {
            tracing::debug!(actor = %actor.name, %err, "skill not activated");
            0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::StatBlock;

    fn actor() -> Entity {
        Entity::new("Hero", StatBlock::new())
    }

    fn berserk() -> Skill {
        Skill::new("Berserk Rage", 2.0).with_cost(ResourceKind::Stamina, 10.0)
    }

    #[test]
    fn activation_pays_cost_and_returns_multiplier() {
        let mut hero = actor();
        assert_eq!(berserk().activate(&mut hero), Ok(2.0));
        assert_eq!(hero.stats.get(StatName::Stamina), 40.0);
    }

    #[test]
    fn failed_activation_has_no_side_effects() {
        let mut hero = actor();
        let skill = Skill::new("Costly", 3.0)
            .with_cost(ResourceKind::Stamina, 5.0)
            .with_cost(ResourceKind::Mana, 500.0)
            .with_bonus(StatName::Attack, 5.0);
        let before = hero.clone();

        let err = skill.activate(&mut hero).unwrap_err();
        assert_eq!(err.error_code(), "SKILL_INSUFFICIENT_RESOURCE");
        assert_eq!(hero, before);
        assert_eq!(skill.activate_or_zero(&mut hero), 0.0);
    }

    #[test]
    fn temporary_bonus_lands_on_temporary_layer() {
        let mut hero = actor();
        let shield = Skill::new("Divine Shield", 1.0)
            .with_cost(ResourceKind::Mana, 10.0)
            .with_bonus(StatName::Defense, 5.0);
        shield.activate(&mut hero).unwrap();
        assert_eq!(hero.stats.temporary(StatName::Defense), 5.0);
        assert_eq!(hero.stats.get(StatName::Defense), 10.0);
    }

    #[test]
    fn zero_multiplier_skill_still_activates() {
        let mut hero = actor();
        let wave = Skill::new("Healing Wave", 0.0)
            .with_cost(ResourceKind::Mana, 5.0)
            .with_bonus(StatName::Hp, 10.0);
        assert_eq!(wave.activate(&mut hero), Ok(0.0));
        assert_eq!(hero.stats.get(StatName::Mana), 15.0);
    }

    #[test]
    fn equipment_mana_does_not_pay_costs() {
        let mut hero = actor();
        hero.stats.set_stat(StatName::Mana, 5.0, Layer::Permanent);
        hero.stats.modify_stat(StatName::Mana, 15.0, Layer::Equipment);
        let bolt = Skill::new("Dark Bolt", 2.0).with_cost(ResourceKind::Mana, 15.0);
        let before = hero.clone();

        let err = bolt.activate(&mut hero).unwrap_err();
        assert_eq!(
            err,
            SkillError::Insufficient {
                skill: "Dark Bolt".into(),
                resource: ResourceKind::Mana,
                needed: 15.0,
                available: 5.0,
            }
        );
        assert_eq!(hero, before);
        assert_eq!(hero.stats.get(StatName::Mana), 20.0);
    }

    #[test]
    fn temporary_stamina_counts_and_drains_first() {
        let mut hero = actor();
        hero.stats.set_stat(StatName::Stamina, 4.0, Layer::Permanent);
        hero.stats.modify_stat(StatName::Stamina, 6.0, Layer::Temporary);
        hero.stats.modify_stat(StatName::Stamina, 30.0, Layer::Equipment);

        assert_eq!(berserk().activate(&mut hero), Ok(2.0));
        assert_eq!(hero.stats.pool(ResourceKind::Stamina), 0.0);
        assert_eq!(hero.stats.get(StatName::Stamina), 30.0);
        assert!(berserk().activate(&mut hero).is_err());
    }
}
