//! Decisions outside combat: shop trades and puzzle answers.
//!
//! [`RoomInput`] extends the core's [`CombatInput`], so one decision maker
//! covers every room a session can run.

use std::collections::VecDeque;

use dungeon_core::{CombatInput, CombatView, Item, Player, PlayerChoice, ScriptedInput};

/// What the shopkeeper shows.
#[derive(Clone, Copy, Debug)]
pub struct ShopView<'a> {
    pub player: &'a Player,
    /// Items for sale, priciest first.
    pub stock: &'a [Item],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopChoice {
    /// Index into the stock.
    Buy(usize),
    /// Index into the inventory.
    Sell(usize),
    Leave,
}

/// The question a puzzle is asking right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Question<'a> {
    /// Guess a whole number in `low..=high`; the bounds narrow with each hint.
    Number { low: i64, high: i64 },
    /// Pick the index of the answer.
    Riddle {
        text: &'static str,
        options: &'static [&'static str],
    },
    /// Give the term that follows `shown`.
    Sequence { shown: &'a [i64] },
    /// Pick the index of an option.
    Choice {
        description: &'static str,
        options: &'a [&'static str],
    },
    /// Answer non-zero to pay `stake` and roll again.
    Dice { stake: u32, gold: u32 },
}

#[derive(Clone, Copy, Debug)]
pub struct PuzzlePrompt<'a> {
    pub player: &'a Player,
    pub question: Question<'a>,
    /// Zero-based attempt (or round, for dice).
    pub attempt: u32,
}

/// Source of every decision a session asks for.
pub trait RoomInput: CombatInput {
    fn shop(&mut self, view: ShopView<'_>) -> ShopChoice;
    fn answer(&mut self, prompt: PuzzlePrompt<'_>) -> i64;
}

/// Combat scripts never trade and answer zero.
impl RoomInput for ScriptedInput {
    fn shop(&mut self, _view: ShopView<'_>) -> ShopChoice {
        ShopChoice::Leave
    }

    fn answer(&mut self, _prompt: PuzzlePrompt<'_>) -> i64 {
        0
    }
}

/// Replays scripted combat choices, shop choices and answers.
///
/// Once a queue runs dry it attacks, leaves the shop, or answers zero.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRoomInput {
    combat: ScriptedInput,
    shop: VecDeque<ShopChoice>,
    answers: VecDeque<i64>,
}

impl ScriptedRoomInput {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_combat(mut self, choices: impl IntoIterator<Item = PlayerChoice>) -> Self {
        self.combat = ScriptedInput::new(choices);
        self
    }

    #[must_use]
    pub fn with_shop(mut self, choices: impl IntoIterator<Item = ShopChoice>) -> Self {
        self.shop.extend(choices);
        self
    }

    #[must_use]
    pub fn with_answers(mut self, answers: impl IntoIterator<Item = i64>) -> Self {
        self.answers.extend(answers);
        self
    }
}

impl CombatInput for ScriptedRoomInput {
    fn choose(&mut self, view: CombatView<'_>) -> PlayerChoice {
        self.combat.choose(view)
    }
}

impl RoomInput for ScriptedRoomInput {
    fn shop(&mut self, _view: ShopView<'_>) -> ShopChoice {
        self.shop.pop_front().unwrap_or(ShopChoice::Leave)
    }

    fn answer(&mut self, _prompt: PuzzlePrompt<'_>) -> i64 {
        self.answers.pop_front().unwrap_or(0)
    }
}
