//! Puzzle rooms: five small games that pay out on a solve.
//!
//! A puzzle is rolled with its room so a seed replays the same riddle or
//! target. Answers come from a [`RoomInput`]. Only a real solve counts toward
//! `puzzles_solved` and the puzzle quests.

use dungeon_core::progression::objective;
use dungeon_core::stats::ResourceKind;
use dungeon_core::{
    Item, ItemFactory, Layer, LootKind, LootRequest, Player, RngOracle, StatName, TablesOracle,
};

use crate::input::{PuzzlePrompt, Question, RoomInput};

const RIDDLE_ANSWERS: &[&str] = &["echo", "footprint", "keyboard"];

/// Riddle text, indexed like its answer in [`RIDDLE_ANSWERS`].
const RIDDLES: [&str; 3] = [
    "I speak without a mouth and hear without ears. I have no body, but I come alive with the wind. What am I?",
    "The more you take, the more you leave behind. What am I?",
    "I have keys but no locks, a space but no room, and you can enter but you can't get out. What am I?",
];

#[derive(Clone, Copy, Debug, PartialEq)]
enum ChoiceEffect {
    Heal(f64),
    Damage(f64),
    AttackBoost(f64),
    Loot(LootKind),
}

struct ChoiceSet {
    description: &'static str,
    options: [(&'static str, ChoiceEffect); 3],
}

static CHOICES: [ChoiceSet; 2] = [
    ChoiceSet {
        description: "Three coloured potions stand on a pedestal: red, blue and green.",
        options: [
            ("Red Potion", ChoiceEffect::Heal(20.0)),
            ("Blue Potion", ChoiceEffect::Damage(10.0)),
            ("Green Potion", ChoiceEffect::AttackBoost(2.0)),
        ],
    },
    ChoiceSet {
        description: "Three levers carry strange symbols: a sword, a shield and a serpent.",
        options: [
            ("Sword Lever", ChoiceEffect::Loot(LootKind::Weapon)),
            ("Shield Lever", ChoiceEffect::Loot(LootKind::Armor)),
            ("Serpent Lever", ChoiceEffect::Damage(15.0)),
        ],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PuzzleKind {
    Riddle,
    Number,
    Sequence,
    Choice,
    Dice,
}

/// A puzzle with its hidden answer already rolled.
#[derive(Clone, Debug, PartialEq)]
pub enum Puzzle {
    Riddle { riddle: usize },
    Number { target: i64 },
    /// Five terms; the first four are shown.
    Sequence { terms: [i64; 5] },
    Choice { set: usize },
    Dice,
}

/// Something a puzzle gave or took.
#[derive(Clone, Debug, PartialEq)]
pub enum PuzzleReward {
    Gold(u32),
    Item(Item),
    /// Won but left behind for lack of room.
    LostItem(Item),
    Stat { stat: StatName, amount: f64 },
    Healed(f64),
    Damage(f64),
    /// Stake paid for a dice round.
    Stake(u32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PuzzleReport {
    pub kind: PuzzleKind,
    pub solved: bool,
    /// Answers given (dice rounds played).
    pub attempts: u32,
    pub rewards: Vec<PuzzleReward>,
}

impl Puzzle {
    pub const NUMBER_RANGE: (i64, i64) = (1, 20);
    pub const NUMBER_ATTEMPTS: u32 = 5;
    pub const RIDDLE_ATTEMPTS: u32 = 3;
    pub const SEQUENCE_ATTEMPTS: u32 = 3;
    pub const DICE_STAKE: u32 = 10;
    pub const DICE_ROUNDS: u32 = 10;
    /// Rarity boost for items a puzzle hands out.
    pub const LOOT_BOOST: f64 = 1.2;

    /// Pick a puzzle type uniformly and roll its answer.
    ///
    /// Sequences are arithmetic (start 1-10, step 1-5) or geometric
    /// (start 1-5, ratio 2-3).
    pub fn roll(rng: &mut dyn RngOracle) -> Self {
        match rng.range(0, 4) {
            0 => Self::Riddle {
                riddle: rng.choose_index(RIDDLES.len()).unwrap_or(0),
            },
            1 => Self::Number {
                target: rng.range(Self::NUMBER_RANGE.0, Self::NUMBER_RANGE.1),
            },
            2 => {
                let mut terms = [0; 5];
                if rng.chance(0.5) {
                    let (start, step) = (rng.range(1, 10), rng.range(1, 5));
                    for (i, term) in terms.iter_mut().enumerate() {
                        *term = start + i as i64 * step;
                    }
                } else {
                    let (start, ratio) = (rng.range(1, 5), rng.range(2, 3));
                    let mut value = start;
                    for term in &mut terms {
                        *term = value;
                        value *= ratio;
                    }
                }
                Self::Sequence { terms }
            }
            3 => Self::Choice {
                set: rng.choose_index(CHOICES.len()).unwrap_or(0),
            },
            _ => Self::Dice,
        }
    }

    pub fn kind(&self) -> PuzzleKind {
        match self {
            Self::Riddle { .. } => PuzzleKind::Riddle,
            Self::Number { .. } => PuzzleKind::Number,
            Self::Sequence { .. } => PuzzleKind::Sequence,
            Self::Choice { .. } => PuzzleKind::Choice,
            Self::Dice => PuzzleKind::Dice,
        }
    }

    /// Play the puzzle to the end and apply its rewards and penalties.
    ///
    /// Failed riddles and sequences spring a trap that never takes the player
    /// below 1 hp.
    pub fn run(
        &self,
        player: &mut Player,
        tables: &dyn TablesOracle,
        rng: &mut dyn RngOracle,
        input: &mut dyn RoomInput,
    ) -> PuzzleReport {
        let mut table = Table {
            player,
            factory: ItemFactory::new(tables.armor_sets()),
            rng,
            input,
            attempts: 0,
            rewards: Vec::new(),
        };
        let solved = match self {
            Self::Riddle { riddle } => table.riddle(*riddle),
            Self::Number { target } => table.number(*target),
            Self::Sequence { terms } => table.sequence(terms),
            Self::Choice { set } => table.choice(*set),
            Self::Dice => table.dice(),
        };

        if solved {
            table.player.puzzles_solved += 1;
            table.player.update_quests(objective::COMPLETE_PUZZLES, 1);
        }
        tracing::info!(kind = %self.kind(), solved, attempts = table.attempts, "puzzle finished");

        PuzzleReport {
            kind: self.kind(),
            solved,
            attempts: table.attempts,
            rewards: table.rewards,
        }
    }
}

/// Player, randomness and answers for one puzzle.
struct Table<'a> {
    player: &'a mut Player,
    factory: ItemFactory<'a>,
    rng: &'a mut dyn RngOracle,
    input: &'a mut dyn RoomInput,
    attempts: u32,
    rewards: Vec<PuzzleReward>,
}

impl Table<'_> {
    fn ask(&mut self, question: Question<'_>) -> i64 {
        let answer = self.input.answer(PuzzlePrompt {
            player: self.player,
            question,
            attempt: self.attempts,
        });
        self.attempts += 1;
        answer
    }

    fn level(&self) -> i64 {
        i64::from(self.player.dungeon_level)
    }

    /// Target 1-20, five guesses with higher/lower hints.
    /// Solve: `U(20, 50) * level` gold.
    fn number(&mut self, target: i64) -> bool {
        let (mut low, mut high) = Puzzle::NUMBER_RANGE;
        for _ in 0..Puzzle::NUMBER_ATTEMPTS {
            let guess = self.ask(Question::Number { low, high });
            if guess == target {
                let gold = self.rng.range(20, 50) * self.level();
                self.pay(gold);
                return true;
            }
            if guess < target {
                low = low.max(guess + 1);
            } else {
                high = high.min(guess - 1);
            }
        }
        false
    }

    /// Solve: `U(50, 100)` gold. Fail: `U(5, 15) * level` damage.
    fn riddle(&mut self, riddle: usize) -> bool {
        let text = RIDDLES.get(riddle).copied().unwrap_or(RIDDLES[0]);
        for _ in 0..Puzzle::RIDDLE_ATTEMPTS {
            let answer = self.ask(Question::Riddle {
                text,
                options: RIDDLE_ANSWERS,
            });
            if usize::try_from(answer).ok() == Some(riddle) {
                let gold = self.rng.range(50, 100);
                self.pay(gold);
                return true;
            }
        }
        let damage = self.rng.range(5, 15) * self.level();
        self.wound(damage as f64);
        false
    }

    /// Solve: one of gold (`U(50, 100) * level`), a boosted item, or a
    /// permanent stat point. Fail: `U(5, 10) * level` damage.
    fn sequence(&mut self, terms: &[i64; 5]) -> bool {
        let (shown, hidden) = terms.split_at(4);
        for _ in 0..Puzzle::SEQUENCE_ATTEMPTS {
            if Some(&self.ask(Question::Sequence { shown })) == hidden.first() {
                match self.rng.range(0, 2) {
                    0 => {
                        let gold = self.rng.range(50, 100) * self.level();
                        self.pay(gold);
                    }
                    1 => self.loot(LootRequest::default().with_rarity_boost(Puzzle::LOOT_BOOST)),
                    _ => self.stat_point(),
                }
                return true;
            }
        }
        let damage = self.rng.range(5, 10) * self.level();
        self.wound(damage as f64);
        false
    }

    /// Counts as solved when the chosen option is not a trap.
    fn choice(&mut self, set: usize) -> bool {
        let set = CHOICES.get(set).unwrap_or(&CHOICES[0]);
        let names = set.options.map(|(name, _)| name);
        let answer = self.ask(Question::Choice {
            description: set.description,
            options: &names,
        });
        let Some((name, effect)) = usize::try_from(answer).ok().and_then(|i| set.options.get(i))
        else {
            tracing::debug!(answer, "no such option, the puzzle stays sealed");
            return false;
        };
        tracing::debug!(option = *name, "option chosen");

        match *effect {
            ChoiceEffect::Heal(amount) => {
                let healed = self.player.entity.heal(amount);
                self.rewards.push(PuzzleReward::Healed(healed));
                true
            }
            ChoiceEffect::Damage(amount) => {
                self.wound(amount);
                false
            }
            ChoiceEffect::AttackBoost(amount) => {
                self.raise(StatName::Attack, amount);
                true
            }
            ChoiceEffect::Loot(kind) => {
                self.loot(
                    LootRequest::default()
                        .with_rarity_boost(Puzzle::LOOT_BOOST)
                        .of_kind(kind),
                );
                true
            }
        }
    }

    /// Pay a stake, roll three dice. Three of a kind wins an item, a sum over
    /// 10 wins `U(15, 30)` gold. Solved once any round wins.
    fn dice(&mut self) -> bool {
        let mut won = false;
        for _ in 0..Puzzle::DICE_ROUNDS {
            let stake = Puzzle::DICE_STAKE;
            if self.player.gold < stake {
                break;
            }
            let gold = self.player.gold;
            if self.ask(Question::Dice { stake, gold }) == 0 {
                break;
            }
            self.player.gold -= stake;
            self.player.gold_spent = self.player.gold_spent.saturating_add(stake);
            self.rewards.push(PuzzleReward::Stake(stake));

            let dice = [self.rng.range(1, 6), self.rng.range(1, 6), self.rng.range(1, 6)];
            tracing::debug!(?dice, "dice rolled");
            if dice[0] == dice[1] && dice[1] == dice[2] {
                self.loot(LootRequest::default());
                won = true;
            } else if dice.iter().sum::<i64>() > 10 {
                let gold = self.rng.range(15, 30);
                self.pay(gold);
                won = true;
            }
        }
        won
    }

    // ========================================================================
    // Effects
    // ========================================================================

    fn pay(&mut self, gold: i64) {
        let gold = u32::try_from(gold).unwrap_or(0);
        self.player.gold = self.player.gold.saturating_add(gold);
        self.rewards.push(PuzzleReward::Gold(gold));
    }

    fn loot(&mut self, request: LootRequest<'_>) {
        let item = self.factory.generate_random_item(self.player, self.rng, request);
        let kept = item.clone();
        match self.player.pick_up(item) {
            Ok(()) => self.rewards.push(PuzzleReward::Item(kept)),
            Err((err, item)) => {
                tracing::warn!(item = %item.name(), %err, "puzzle prize left behind");
                self.rewards.push(PuzzleReward::LostItem(item));
            }
        }
    }

    /// +1 attack, defense or luck, or +5 to the hp, mana or stamina maximum
    /// and its current value.
    fn stat_point(&mut self) {
        let options = [
            (StatName::Attack, 1.0),
            (StatName::Defense, 1.0),
            (StatName::MaxHp, 5.0),
            (StatName::Luck, 1.0),
            (StatName::MaxMana, 5.0),
            (StatName::MaxStamina, 5.0),
        ];
        let index = self.rng.choose_index(options.len()).unwrap_or(0);
        let (stat, amount) = options[index.min(options.len() - 1)];
        self.raise(stat, amount);
        let current = match stat {
            StatName::MaxHp => Some(ResourceKind::Hp),
            StatName::MaxMana => Some(ResourceKind::Mana),
            StatName::MaxStamina => Some(ResourceKind::Stamina),
            _ => None,
        };
        if let Some(kind) = current {
            self.player.entity.stats.restore(kind, amount);
        }
    }

    fn raise(&mut self, stat: StatName, amount: f64) {
        self.player
            .entity
            .stats
            .modify_stat(stat, amount, Layer::Permanent);
        self.rewards.push(PuzzleReward::Stat { stat, amount });
    }

    /// Damage that stops at 1 hp.
    fn wound(&mut self, amount: f64) {
        let hp = self.player.stats().pool(ResourceKind::Hp);
        let dealt = amount.min((hp - 1.0).max(0.0));
        let drain = self.player.entity.take_damage(dealt);
        self.rewards.push(PuzzleReward::Damage(drain.total()));
    }
}
