//! Where the controller gets the player's decisions from.

use std::collections::VecDeque;

use crate::entity::{Enemy, Player};

/// One menu selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerChoice {
    Attack,
    /// Index into the player's skills.
    Skill(usize),
    /// Index into the potions carried, in inventory order.
    Item(usize),
    /// Index into the spellbook.
    Spell(usize),
    Run,
    /// Unparseable or out-of-menu input. Reprompts without using the turn.
    Invalid,
}

/// Read-only state shown to the decision maker.
#[derive(Clone, Copy, Debug)]
pub struct CombatView<'a> {
    pub player: &'a Player,
    pub enemy: &'a Enemy,
    pub can_flee: bool,
    pub round: u32,
}

/// Source of player decisions: a terminal menu, an AI, or a script.
pub trait CombatInput {
    fn choose(&mut self, view: CombatView<'_>) -> PlayerChoice;
}

/// Replays a fixed list of choices, then attacks forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    choices: VecDeque<PlayerChoice>,
}

impl ScriptedInput {
    pub fn new(choices: impl IntoIterator<Item = PlayerChoice>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.choices.len()
    }
}

impl CombatInput for ScriptedInput {
    fn choose(&mut self, _view: CombatView<'_>) -> PlayerChoice {
        self.choices.pop_front().unwrap_or(PlayerChoice::Attack)
    }
}
