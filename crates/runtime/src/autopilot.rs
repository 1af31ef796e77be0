//! Utility-scored combat decisions for unattended runs.
//!
//! Every menu option gets a [`Score`]; the highest wins, ties going to the
//! option listed first. Scores combine how favourable the situation is with
//! how much the pilot's [`Temperament`] likes that kind of move:
//!
//! ```text
//! value = is_possible × situation × preference / 100
//! ```
//!
//! Scoring is pure. The same view always yields the same choice.
//!
//! Outside combat the pilot keeps a simple routine. It buys a healing potion
//! when it carries none, selling its cheapest item first if the bag is full.
//! Puzzles are answered by bisecting ranges and extending sequences.

use dungeon_core::items::PotionEffect;
use dungeon_core::stats::ResourceKind;
use dungeon_core::{CombatInput, CombatView, Item, Player, PlayerChoice, Skill, StatName};

use crate::input::{PuzzlePrompt, Question, RoomInput, ShopChoice, ShopView};

/// One option's utility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub is_possible: bool,
    /// How well the current fight suits the option (0-100).
    pub situation: u32,
    /// Temperament weight for the option (0-100).
    pub preference: u32,
}

impl Score {
    pub const fn impossible() -> Self {
        Self {
            is_possible: false,
            situation: 0,
            preference: 0,
        }
    }

    pub const fn new(situation: u32, preference: u32) -> Self {
        Self {
            is_possible: true,
            situation: if situation > 100 { 100 } else { situation },
            preference: if preference > 100 { 100 } else { preference },
        }
    }

    pub const fn value(&self) -> u32 {
        if self.is_possible {
            self.situation * self.preference / 100
        } else {
            0
        }
    }
}

/// How the pilot weighs offence against self-preservation (0-100 each).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Temperament {
    pub aggression: u32,
    pub caution: u32,
}

impl Temperament {
    pub const fn balanced() -> Self {
        Self {
            aggression: 60,
            caution: 50,
        }
    }

    pub const fn reckless() -> Self {
        Self {
            aggression: 100,
            caution: 10,
        }
    }

    pub const fn cautious() -> Self {
        Self {
            aggression: 40,
            caution: 90,
        }
    }

    /// Hp fraction below which healing becomes an option.
    ///
    /// Formula: `0.25 + caution / 200`
    pub fn heal_threshold(&self) -> f64 {
        0.25 + f64::from(self.caution) / 200.0
    }
}

impl Default for Temperament {
    fn default() -> Self {
        Self::balanced()
    }
}

/// [`RoomInput`] that picks the best-scoring option every combat turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoPilot {
    temperament: Temperament,
}

impl AutoPilot {
    /// Gold the pilot keeps back before it will gamble at the dice table.
    pub const DICE_RESERVE: u32 = 50;

    pub const fn new(temperament: Temperament) -> Self {
        Self { temperament }
    }

    /// Score every option on the menu, in menu order.
    pub fn score_all(&self, view: &CombatView<'_>) -> Vec<(PlayerChoice, Score)> {
        let player = view.player;
        let hp_ratio = hp_ratio(player);
        let heal_slot = healing_potion(player);
        let t = self.temperament;

        let mut options = vec![(PlayerChoice::Attack, Score::new(50, t.aggression))];

        for (i, skill) in player.skills.iter().enumerate() {
            let score = if can_afford(player, skill) {
                let boost = ((skill.damage_multiplier - 1.0).max(0.0) * 25.0) as u32;
                Score::new(50 + boost, t.aggression)
            } else {
                Score::impossible()
            };
            options.push((PlayerChoice::Skill(i), score));
        }

        let mana = player.stats().pool(ResourceKind::Mana);
        let enemy_hp = view.enemy.entity.stats.pool(ResourceKind::Hp);
        let tough = enemy_hp > player.total_damage() * 2.0;
        for (i, spell) in player.spells.iter().enumerate() {
            let score = if mana >= spell.mana_cost && spell.effect.needs_target() {
                Score::new(if tough { 70 } else { 20 }, t.aggression)
            } else {
                Score::impossible()
            };
            options.push((PlayerChoice::Spell(i), score));
        }

        if let Some(slot) = heal_slot {
            let score = if hp_ratio < self.temperament.heal_threshold() {
                Score::new(((1.0 - hp_ratio) * 100.0) as u32 + 20, t.caution)
            } else {
                Score::impossible()
            };
            options.push((PlayerChoice::Item(slot), score));
        }

        let flee = if view.can_flee && heal_slot.is_none() && hp_ratio < 0.2 {
            Score::new(90, t.caution)
        } else {
            Score::impossible()
        };
        options.push((PlayerChoice::Run, flee));

        options
    }
}

impl CombatInput for AutoPilot {
    fn choose(&mut self, view: CombatView<'_>) -> PlayerChoice {
        let mut best = (PlayerChoice::Attack, Score::impossible());
        for (choice, score) in self.score_all(&view) {
            if score.value() > best.1.value() {
                best = (choice, score);
            }
        }
        tracing::debug!(round = view.round, choice = ?best.0, score = best.1.value(), "autopilot");
        best.0
    }
}

impl RoomInput for AutoPilot {
    fn shop(&mut self, view: ShopView<'_>) -> ShopChoice {
        let player = view.player;
        let wanted = healing_potion(player)
            .is_none()
            .then(|| {
                view.stock
                    .iter()
                    .position(|item| is_affordable_heal(item, player.gold))
            })
            .flatten();
        let choice = match wanted {
            Some(_) if player.inventory.is_full() => player
                .inventory
                .iter()
                .enumerate()
                .min_by_key(|(_, item)| item.value())
                .map_or(ShopChoice::Leave, |(index, _)| ShopChoice::Sell(index)),
            Some(index) => ShopChoice::Buy(index),
            None => ShopChoice::Leave,
        };
        tracing::debug!(?choice, gold = player.gold, "autopilot shopping");
        choice
    }

    fn answer(&mut self, prompt: PuzzlePrompt<'_>) -> i64 {
        match prompt.question {
            Question::Number { low, high } => low + (high - low) / 2,
            Question::Riddle { .. } => i64::from(prompt.attempt),
            Question::Sequence { shown } => next_term(shown),
            Question::Choice { .. } => 0,
            Question::Dice { gold, .. } => {
                i64::from(prompt.attempt == 0 && gold >= Self::DICE_RESERVE)
            }
        }
    }
}

fn is_affordable_heal(item: &Item, gold: u32) -> bool {
    matches!(item, Item::Potion(potion) if potion.effect() == Some(PotionEffect::Heal))
        && item.value() <= gold
}

/// Continue an arithmetic run, or failing that a geometric one.
fn next_term(shown: &[i64]) -> i64 {
    let [.., a, b] = shown else {
        return shown.last().copied().unwrap_or(0);
    };
    let step = b - a;
    if shown.windows(2).all(|pair| pair[1] - pair[0] == step) {
        return b + step;
    }
    if *a != 0 && b % a == 0 {
        return b * (b / a);
    }
    b + step
}

fn hp_ratio(player: &Player) -> f64 {
    let max = player.stat(StatName::MaxHp);
    if max <= 0.0 {
        return 0.0;
    }
    player.stats().pool(ResourceKind::Hp) / max
}

/// Position of the first healing potion among the potions carried.
fn healing_potion(player: &Player) -> Option<usize> {
    player
        .inventory
        .potions()
        .position(|potion| potion.effect() == Some(PotionEffect::Heal))
}

fn can_afford(player: &Player, skill: &Skill) -> bool {
    skill
        .cost
        .iter()
        .all(|(kind, amount)| player.stats().pool(*kind) >= *amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::items::WeaponType;
    use dungeon_core::{Enemy, Gear, Potion, Spell, SpellEffect};

    fn view<'a>(player: &'a Player, enemy: &'a Enemy) -> CombatView<'a> {
        CombatView {
            player,
            enemy,
            can_flee: true,
            round: 1,
        }
    }

    #[test]
    fn healthy_pilot_attacks() {
        let player = Player::new("Pilot");
        let enemy = Enemy::new("Rat", 10.0, 2.0, 0.0);
        let mut pilot = AutoPilot::default();

        assert_eq!(pilot.choose(view(&player, &enemy)), PlayerChoice::Attack);
    }

    #[test]
    fn wounded_pilot_drinks() {
        let mut player = Player::new("Pilot");
        player.entity.take_damage(80.0);
        let enemy = Enemy::new("Rat", 10.0, 2.0, 0.0);
        let mut pilot = AutoPilot::default();

        assert_eq!(pilot.choose(view(&player, &enemy)), PlayerChoice::Item(0));
    }

    #[test]
    fn out_of_potions_and_nearly_dead_runs() {
        let mut player = Player::new("Pilot");
        let _ = player.inventory.drain();
        player.entity.take_damage(90.0);
        let enemy = Enemy::new("Ogre", 100.0, 20.0, 0.0);
        let mut pilot = AutoPilot::new(Temperament::cautious());

        assert_eq!(pilot.choose(view(&player, &enemy)), PlayerChoice::Run);

        let boss = view(&player, &enemy);
        let cornered = CombatView {
            can_flee: false,
            ..boss
        };
        assert_eq!(pilot.choose(cornered), PlayerChoice::Attack);
    }

    #[test]
    fn strong_skill_beats_plain_attack() {
        let mut player = Player::new("Pilot");
        player
            .skills
            .push(Skill::new("Power Strike", 2.0).with_cost(ResourceKind::Stamina, 10.0));
        let enemy = Enemy::new("Rat", 10.0, 2.0, 0.0);
        let mut pilot = AutoPilot::default();

        assert_eq!(pilot.choose(view(&player, &enemy)), PlayerChoice::Skill(0));

        player.entity.stats.use_stamina(45.0);
        assert_eq!(pilot.choose(view(&player, &enemy)), PlayerChoice::Attack);
    }

    #[test]
    fn spells_are_saved_for_tough_enemies() {
        let mut player = Player::new("Pilot");
        player.spells.push(Spell::new("Fireball", 10.0, SpellEffect::BurnDamage(20.0)));
        let rat = Enemy::new("Rat", 5.0, 2.0, 0.0);
        let ogre = Enemy::new("Ogre", 200.0, 20.0, 0.0);
        let mut pilot = AutoPilot::default();

        assert_eq!(pilot.choose(view(&player, &rat)), PlayerChoice::Attack);
        assert_eq!(pilot.choose(view(&player, &ogre)), PlayerChoice::Spell(0));
    }

    fn shop_view<'a>(player: &'a Player, stock: &'a [Item]) -> ShopView<'a> {
        ShopView { player, stock }
    }

    #[test]
    fn pilot_restocks_potions_it_can_afford() {
        let mut player = Player::new("Pilot");
        let _ = player.inventory.drain();
        let stock: Vec<Item> = vec![
            Gear::weapon("Kris", WeaponType::Dagger, 3.0).with_value(20).into(),
            Potion::new("Elixir", PotionEffect::Heal, 80.0).with_value(90).into(),
            Potion::new("Tonic", PotionEffect::Heal, 30.0).with_value(40).into(),
        ];
        let mut pilot = AutoPilot::default();

        assert_eq!(pilot.shop(shop_view(&player, &stock)), ShopChoice::Buy(2));

        player.inventory.add(stock[2].clone()).unwrap();
        assert_eq!(pilot.shop(shop_view(&player, &stock)), ShopChoice::Leave);
    }

    #[test]
    fn full_bag_makes_room_for_a_potion() {
        let mut player = Player::new("Pilot");
        let _ = player.inventory.drain();
        player
            .inventory
            .add(Gear::weapon("Axe", WeaponType::Axe, 5.0).with_value(30))
            .unwrap();
        player
            .inventory
            .add(Gear::weapon("Stick", WeaponType::Staff, 1.0).with_value(3))
            .unwrap();
        player.inventory.set_limit(Some(2));
        let stock: Vec<Item> = vec![Potion::new("Tonic", PotionEffect::Heal, 30.0).with_value(40).into()];
        let mut pilot = AutoPilot::default();

        assert_eq!(pilot.shop(shop_view(&player, &stock)), ShopChoice::Sell(1));
        // Nothing worth buying: keep the bag as it is.
        assert_eq!(pilot.shop(shop_view(&player, &[])), ShopChoice::Leave);
    }

    fn ask(question: Question<'_>, attempt: u32) -> i64 {
        let player = Player::new("Pilot");
        AutoPilot::default().answer(PuzzlePrompt {
            player: &player,
            question,
            attempt,
        })
    }

    #[test]
    fn pilot_extends_sequences() {
        assert_eq!(ask(Question::Sequence { shown: &[1, 4, 7, 10] }, 0), 13);
        assert_eq!(ask(Question::Sequence { shown: &[2, 6, 18, 54] }, 0), 162);
        assert_eq!(ask(Question::Sequence { shown: &[5] }, 0), 5);
    }

    #[test]
    fn pilot_bisects_and_cycles_riddles() {
        assert_eq!(ask(Question::Number { low: 1, high: 20 }, 0), 10);
        assert_eq!(ask(Question::Number { low: 11, high: 12 }, 2), 11);
        let riddle = Question::Riddle {
            text: "?",
            options: &["a", "b", "c"],
        };
        assert_eq!(ask(riddle, 2), 2);
    }

    #[test]
    fn pilot_plays_one_dice_round_when_flush() {
        assert_eq!(ask(Question::Dice { stake: 10, gold: 80 }, 0), 1);
        assert_eq!(ask(Question::Dice { stake: 10, gold: 80 }, 1), 0);
        assert_eq!(ask(Question::Dice { stake: 10, gold: 20 }, 0), 0);
    }

    #[test]
    fn reckless_pilot_ignores_wounds_longer() {
        assert!(Temperament::reckless().heal_threshold() < Temperament::cautious().heal_threshold());
        assert_eq!(Score::new(150, 50).value(), 50);
        assert_eq!(Score::impossible().value(), 0);
    }
}
