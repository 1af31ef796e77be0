//! Active status effects on one entity.

use arrayvec::ArrayVec;

use super::effect::StatusEffect;
use crate::config::GameConfig;

/// Result of adding an effect to the active list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Insertion {
    /// New entry; the caller runs the effect's apply hook.
    Added,
    /// Same-named effect already active; its duration became the longer of the two.
    Refreshed,
    /// No slot left. Cannot happen with one slot per effect kind.
    Full,
}

/// Bounded list of active effects, at most one per effect name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect or refresh the duration of the active one with the same name.
    pub fn insert_or_refresh(&mut self, effect: StatusEffect) -> Insertion {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.name() == effect.name()) {
            existing.duration = existing.duration.max(effect.duration);
            return Insertion::Refreshed;
        }
        match self.effects.try_push(effect) {
            Ok(()) => Insertion::Added,
            Err(_) => Insertion::Full,
        }
    }

    pub fn get(&self, name: &str) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Drop expired effects and return their names.
    pub(crate) fn remove_expired(&mut self) -> Vec<&'static str> {
        let expired = self
            .effects
            .iter()
            .filter(|e| e.is_expired())
            .map(StatusEffect::name)
            .collect();
        self.effects.retain(|e| !e.is_expired());
        expired
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
