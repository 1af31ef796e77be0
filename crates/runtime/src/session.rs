//! One player's run through the dungeon.
//!
//! [`Session`] owns the player between rooms and is the only caller of the
//! combat controller. Each room follows the same contract: spring the trap,
//! resolve the room, count the exploration, and report whether the player
//! walked out. Clearing a boss room advances the dungeon level.
//!
//! Every decision comes from one [`RoomInput`], which answers for combat,
//! shops and puzzles alike.

use dungeon_core::progression::objective;
use dungeon_core::{
    CombatController, CombatError, CombatInput, CombatOutcome, CombatReport, Difficulty, Enemy,
    Item, Layer, Player, RngOracle, StatName, TablesOracle,
};

use crate::dungeon::{Dungeon, Room, RoomKind, Trap};
use crate::input::{RoomInput, ShopChoice, ShopView};
use crate::puzzle::{Puzzle, PuzzleReport};

/// What a trap did to the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrapOutcome {
    pub trap: Trap,
    pub avoided: bool,
}

/// What happened inside a room.
#[derive(Clone, Debug, PartialEq)]
pub enum RoomOutcome {
    /// A fight room with nobody left to fight.
    Empty,
    Combat(CombatReport),
    Treasure {
        found: Vec<Item>,
        lost: Vec<Item>,
        /// Crafting material key added to the player's stock.
        material: Option<String>,
    },
    Shop { bought: Vec<Item>, sold: Vec<Item> },
    Rest { hp: f64, mana: f64, stamina: f64 },
    Puzzle(PuzzleReport),
}

/// Rewards for clearing a dungeon level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelReport {
    pub cleared: u32,
    pub reward: u32,
    pub levels_gained: u32,
    /// The final level fell for the first time in this difficulty. The caller
    /// decides between [`Session::start_ng_plus`] and
    /// [`Session::switch_difficulty`].
    pub run_finished: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomReport {
    pub kind: RoomKind,
    pub trap: Option<TrapOutcome>,
    pub outcome: RoomOutcome,
    pub survived: bool,
    pub level: Option<LevelReport>,
}

pub struct Session<T, R> {
    tables: T,
    rng: R,
    player: Player,
    dungeon: Option<Dungeon>,
    rooms_explored: u32,
}

impl<T: TablesOracle, R: RngOracle> Session<T, R> {
    /// Dungeon level whose boss ends a run.
    pub const FINAL_LEVEL: u32 = 10;
    /// Gold and xp per level reached, paid on a clear.
    pub const LEVEL_REWARD: u32 = 50;
    pub const LEVEL_STAMINA: f64 = 100.0;
    pub const LEVEL_MANA: f64 = 25.0;
    /// Trades a single shop visit allows before the keeper closes up.
    pub const SHOP_ACTIONS: u32 = 20;

    pub fn new(tables: T, player: Player, rng: R) -> Self {
        Self {
            tables,
            rng,
            player,
            dungeon: None,
            rooms_explored: 0,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn into_player(self) -> Player {
        self.player
    }

    pub fn tables(&self) -> &T {
        &self.tables
    }

    /// The level being explored, if one has been laid out.
    pub fn dungeon(&self) -> Option<&Dungeon> {
        self.dungeon.as_ref()
    }

    pub fn rooms_explored(&self) -> u32 {
        self.rooms_explored
    }

    /// Enter the next room of the current level, laying the level out first
    /// when needed.
    pub fn explore<I: RoomInput>(&mut self, input: &mut I) -> RoomReport {
        let room = match self.dungeon.as_mut().and_then(Dungeon::next_room) {
            Some(room) => room,
            None => {
                let mut dungeon = Dungeon::generate(&self.player, &self.tables, &mut self.rng);
                let room = dungeon.next_room();
                self.dungeon = Some(dungeon);
                // A generated level always ends in a boss room.
                room.unwrap_or_else(|| self.roll_room(RoomKind::Boss))
            }
        };
        self.enter(room, input)
    }

    /// Roll a fresh room of `kind` and run it.
    pub fn run_room<I: RoomInput>(&mut self, kind: RoomKind, input: &mut I) -> RoomReport {
        let room = self.roll_room(kind);
        self.enter(room, input)
    }

    /// Run a prepared room against the player.
    pub fn enter<I: RoomInput>(&mut self, mut room: Room, input: &mut I) -> RoomReport {
        tracing::info!(kind = %room.kind, level = self.player.dungeon_level, "entering room");

        let trap = room.trap.map(|trap| self.spring_trap(trap));

        let outcome = if !self.player.is_alive() {
            RoomOutcome::Empty
        } else {
            match room.kind {
                RoomKind::Combat | RoomKind::Boss => self.fight(&mut room.enemies, input),
                RoomKind::Treasure => self.collect(room.treasure, room.material),
                RoomKind::Shop => self.trade(room.stock, input),
                RoomKind::Rest => self.rest(),
                RoomKind::Puzzle => self.solve(room.puzzle, input),
            }
        };

        self.rooms_explored += 1;
        self.player.update_quests(objective::EXPLORE_ROOMS, 1);

        let survived = self.player.is_alive()
            && !matches!(&outcome, RoomOutcome::Combat(report) if !report.outcome.survived());

        let boss_down = room.kind == RoomKind::Boss
            && survived
            && match &outcome {
                RoomOutcome::Combat(report) => report.outcome == CombatOutcome::Victory,
                RoomOutcome::Empty => true,
                _ => false,
            };
        let level = boss_down.then(|| self.complete_level());

        if !survived {
            tracing::info!(
                player = %self.player.name(),
                level = self.player.dungeon_level,
                rooms = self.rooms_explored,
                "player fell"
            );
        }

        RoomReport {
            kind: room.kind,
            trap,
            outcome,
            survived,
            level,
        }
    }

    /// Pay out a cleared level and move one level deeper.
    ///
    /// # Formula
    ///
    /// ```text
    /// heal     floor(max_hp / 4), stamina +100, mana +25
    /// reward   new_level * 50 gold and xp
    /// ```
    pub fn complete_level(&mut self) -> LevelReport {
        let cleared = self.player.dungeon_level;
        if cleared >= Self::FINAL_LEVEL {
            self.player.update_quests(objective::DEFEAT_FINAL_BOSS, 1);
        }

        self.player.dungeon_level += 1;
        self.player.update_quests(objective::COMPLETE_DUNGEON_LEVELS, 1);

        let max_hp = self.player.stat(StatName::MaxHp);
        self.player.entity.heal((max_hp / 4.0).floor());
        self.player.entity.stats.rest_stamina(Self::LEVEL_STAMINA);
        self.player.entity.stats.regen_mana(Self::LEVEL_MANA);

        let reward = self.player.dungeon_level * Self::LEVEL_REWARD;
        self.player.gold = self.player.gold.saturating_add(reward);
        let levels_gained = self.player.gain_xp(f64::from(reward));

        let run_finished = cleared == Self::FINAL_LEVEL && self.player.ng_plus() == 0;
        self.dungeon = None;

        tracing::info!(cleared, reward, levels_gained, run_finished, "dungeon level cleared");

        LevelReport {
            cleared,
            reward,
            levels_gained,
            run_finished,
        }
    }

    /// Adopt the named class if the player's level has reached it.
    pub fn choose_class(&mut self, name: &str) -> bool {
        let level = self.player.level;
        let Some(class) = self
            .tables
            .classes()
            .iter()
            .find(|class| class.name.eq_ignore_ascii_case(name) && class.unlock_level <= level)
        else {
            return false;
        };
        self.player.choose_class(class, &self.tables);
        true
    }

    /// Start the next NG+ cycle of the current difficulty.
    pub fn start_ng_plus(&mut self) {
        self.player.start_ng_plus(&self.tables);
        self.dungeon = None;
        self.rooms_explored = 0;
    }

    /// Park the current progress and continue in another difficulty from
    /// dungeon level 1.
    pub fn switch_difficulty(&mut self, to: Difficulty) {
        self.player.switch_difficulty(to, self.tables.armor_sets());
        self.player.dungeon_level = 1;
        self.dungeon = None;
        self.rooms_explored = 0;
    }

    // ========================================================================
    // Room handlers
    // ========================================================================

    fn roll_room(&mut self, kind: RoomKind) -> Room {
        Room::generate(kind, &self.player, &self.tables, &mut self.rng)
    }

    fn spring_trap(&mut self, trap: Trap) -> TrapOutcome {
        if self.rng.chance(Trap::avoid_chance(&self.player)) {
            tracing::info!(?trap, "trap avoided");
            return TrapOutcome {
                trap,
                avoided: true,
            };
        }

        match trap {
            Trap::Damage { amount } => {
                self.player.entity.take_damage(amount);
            }
            Trap::Weaken { stat, amount } => {
                self.player
                    .entity
                    .stats
                    .modify_stat(stat, -amount, Layer::Temporary);
            }
        }
        tracing::info!(?trap, "trap sprung");

        TrapOutcome {
            trap,
            avoided: false,
        }
    }

    fn fight(&mut self, enemies: &mut Vec<Enemy>, input: &mut dyn CombatInput) -> RoomOutcome {
        let mut controller = CombatController::new(&self.tables, &mut self.rng);
        match controller.run(&mut self.player, enemies, input) {
            Ok(report) => RoomOutcome::Combat(report),
            Err(CombatError::NoEnemies) => {
                tracing::debug!("no enemies left in the room");
                RoomOutcome::Empty
            }
        }
    }

    fn collect(&mut self, treasure: Vec<Item>, material: Option<String>) -> RoomOutcome {
        let mut found = Vec::new();
        let mut lost = Vec::new();
        for item in treasure {
            let kept = item.clone();
            match self.player.pick_up(item) {
                Ok(()) => found.push(kept),
                Err((err, item)) => {
                    tracing::warn!(item = %item.name(), %err, "treasure left behind");
                    lost.push(item);
                }
            }
        }
        if let Some(key) = &material {
            self.player.materials.add(key, 1);
            tracing::info!(material = %key, "material gathered");
        }
        RoomOutcome::Treasure {
            found,
            lost,
            material,
        }
    }

    /// Let the input trade until it leaves or the keeper closes up.
    ///
    /// Purchases cost the item's value and sales pay half. A refused
    /// purchase returns the item to its shelf.
    fn trade(&mut self, mut stock: Vec<Item>, input: &mut dyn RoomInput) -> RoomOutcome {
        self.player.shops_visited += 1;
        let mut bought = Vec::new();
        let mut sold = Vec::new();

        for _ in 0..Self::SHOP_ACTIONS {
            let view = ShopView {
                player: &self.player,
                stock: &stock,
            };
            match input.shop(view) {
                ShopChoice::Leave => break,
                ShopChoice::Buy(index) if index < stock.len() => {
                    let item = stock.remove(index);
                    let kept = item.clone();
                    match self.player.buy(item) {
                        Ok(_) => bought.push(kept),
                        Err((err, item)) => {
                            tracing::warn!(item = %item.name(), %err, "purchase refused");
                            stock.insert(index, item);
                        }
                    }
                }
                ShopChoice::Buy(index) => tracing::warn!(index, "nothing on that shelf"),
                ShopChoice::Sell(index) => match self.player.sell(index) {
                    Ok((item, _)) => sold.push(item),
                    Err(err) => tracing::warn!(index, %err, "sale refused"),
                },
            }
        }

        tracing::info!(
            bought = bought.len(),
            sold = sold.len(),
            gold = self.player.gold,
            "left the shop"
        );
        RoomOutcome::Shop { bought, sold }
    }

    fn solve(&mut self, puzzle: Option<Puzzle>, input: &mut dyn RoomInput) -> RoomOutcome {
        let puzzle = puzzle.unwrap_or_else(|| Puzzle::roll(&mut self.rng));
        let report = puzzle.run(&mut self.player, &self.tables, &mut self.rng, input);
        RoomOutcome::Puzzle(report)
    }

    /// Recover part of every pool.
    ///
    /// # Formula
    ///
    /// ```text
    /// hp       floor(max_hp      * U(0.3, 0.5))
    /// stamina  floor(max_stamina * U(0.2, 0.6))
    /// mana     floor(max_mana    * U(0.2, 0.4))
    /// ```
    fn rest(&mut self) -> RoomOutcome {
        let hp_amount = self.portion(StatName::MaxHp, 0.3, 0.5);
        let hp = self.player.entity.heal(hp_amount);
        let stamina_amount = self.portion(StatName::MaxStamina, 0.2, 0.6);
        let stamina = self.player.entity.stats.rest_stamina(stamina_amount);
        let mana_amount = self.portion(StatName::MaxMana, 0.2, 0.4);
        let mana = self.player.entity.stats.regen_mana(mana_amount);

        tracing::info!(hp, mana, stamina, "rested");
        RoomOutcome::Rest { hp, mana, stamina }
    }

    fn portion(&mut self, stat: StatName, lo: f64, hi: f64) -> f64 {
        let fraction = lo + (hi - lo) * self.rng.next_f64();
        (self.player.stat(stat) * fraction).floor()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::ScriptedRoomInput;
    use dungeon_core::{
        CombatEvent, EnemyRoster, EnemyTemplate, Gear, PlayerChoice, PlayerClass, Quest,
        ScriptedInput, SequenceRng, StaticTables,
    };
    use dungeon_core::items::WeaponType;

    fn template(name: &str) -> EnemyTemplate {
        EnemyTemplate {
            name: name.into(),
            enemy_type: "Vermin".into(),
            hp_mod: 1.0,
            atk_mod: 1.0,
            def_mod: 1.0,
            agl_mod: 1.0,
            min_level: 1,
        }
    }

    pub(crate) fn tables() -> StaticTables {
        let mut tables = StaticTables::new();
        tables.enemy_roster = EnemyRoster {
            enemies: vec![template("Rat")],
            bosses: vec![template("Rat King")],
        };
        tables
    }

    fn session(rng: SequenceRng) -> Session<StaticTables, SequenceRng> {
        Session::new(tables(), Player::new("Tester"), rng)
    }

    fn room(kind: RoomKind, enemies: Vec<Enemy>) -> Room {
        Room {
            enemies,
            ..Room::new(kind)
        }
    }

    fn attack_only() -> ScriptedInput {
        ScriptedInput::new([PlayerChoice::Attack])
    }

    #[test]
    fn rest_heals_a_rolled_share() {
        let mut session = session(SequenceRng::new([0.5]));
        session.player_mut().entity.take_damage(60.0);

        let report = session.run_room(RoomKind::Rest, &mut attack_only());

        // 0.3 + 0.2 * 0.5 = 0.4 of 100 max hp; stamina and mana are full.
        assert_eq!(
            report.outcome,
            RoomOutcome::Rest {
                hp: 40.0,
                mana: 0.0,
                stamina: 0.0
            }
        );
        assert_eq!(session.player().stat(StatName::Hp), 80.0);
        assert!(report.survived);
        assert!(report.trap.is_none());
    }

    #[test]
    fn every_room_counts_toward_exploration() {
        let mut session = session(SequenceRng::constant(0.5));
        session
            .player_mut()
            .accept_quest(Quest::new("Wanderer", objective::EXPLORE_ROOMS, 2, 10, 0.0));

        session.run_room(RoomKind::Rest, &mut attack_only());
        assert_eq!(session.player().gold, 50);
        session.run_room(RoomKind::Rest, &mut attack_only());

        assert_eq!(session.rooms_explored(), 2);
        assert_eq!(session.player().gold, 60);
        assert_eq!(session.player().completed_quests.len(), 1);
    }

    #[test]
    fn treasure_goes_to_the_inventory() {
        let mut session = session(SequenceRng::constant(0.99));

        let report = session.run_room(RoomKind::Treasure, &mut attack_only());

        let RoomOutcome::Treasure { found, lost, .. } = report.outcome else {
            panic!("expected treasure, got {:?}", report.outcome);
        };
        assert_eq!(found.len(), 2);
        assert!(lost.is_empty());
        // Starting potion plus the two finds.
        assert_eq!(session.player().inventory.len(), 3);
    }

    #[test]
    fn treasure_is_lost_when_the_bag_is_full() {
        let mut session = session(SequenceRng::constant(0.99));
        session.player_mut().inventory.set_limit(Some(1));

        let report = session.run_room(RoomKind::Treasure, &mut attack_only());

        let RoomOutcome::Treasure { found, lost, .. } = report.outcome else {
            panic!("expected treasure, got {:?}", report.outcome);
        };
        assert!(found.is_empty());
        assert_eq!(lost.len(), 2);
        assert!(report.survived);
    }

    #[test]
    fn combat_room_victory_pays_out() {
        let mut session = session(SequenceRng::constant(0.99));
        let rat = Enemy::new("Rat", 5.0, 1.0, 0.0).with_rewards(10.0, 3);

        let report = session.enter(room(RoomKind::Combat, vec![rat]), &mut attack_only());

        let RoomOutcome::Combat(combat) = &report.outcome else {
            panic!("expected combat, got {:?}", report.outcome);
        };
        assert_eq!(combat.outcome, CombatOutcome::Victory);
        assert!(report.survived);
        assert!(report.level.is_none());
        assert_eq!(session.player().gold, 53);
        assert_eq!(session.player().kills, 1);
    }

    #[test]
    fn defeat_means_not_survived() {
        let mut session = session(SequenceRng::constant(0.99));
        session.player_mut().entity.take_damage(99.0);
        let brute = Enemy::new("Brute", 100.0, 50.0, 0.0);

        let report = session.enter(room(RoomKind::Combat, vec![brute]), &mut attack_only());

        assert!(!report.survived);
        assert!(!session.player().is_alive());
        assert!(matches!(
            &report.outcome,
            RoomOutcome::Combat(c) if c.events.last() == Some(&CombatEvent::PlayerDefeated)
        ));
    }

    #[test]
    fn empty_fight_room_is_survived() {
        let mut session = session(SequenceRng::constant(0.99));

        let report = session.enter(room(RoomKind::Combat, Vec::new()), &mut attack_only());

        assert_eq!(report.outcome, RoomOutcome::Empty);
        assert!(report.survived);
    }

    #[test]
    fn boss_victory_clears_the_level() {
        let mut session = session(SequenceRng::constant(0.99));
        let boss = Enemy::new("Rat King", 5.0, 1.0, 0.0).as_boss().with_rewards(0.0, 0);
        session
            .player_mut()
            .accept_quest(Quest::new("Delver", objective::COMPLETE_DUNGEON_LEVELS, 1, 0, 0.0));

        let report = session.enter(room(RoomKind::Boss, vec![boss]), &mut attack_only());

        assert_eq!(
            report.level,
            Some(LevelReport {
                cleared: 1,
                reward: 100,
                levels_gained: 1,
                run_finished: false,
            })
        );
        let player = session.player();
        assert_eq!(player.dungeon_level, 2);
        assert_eq!(player.gold, 150);
        assert_eq!(player.level, 2);
        assert_eq!(player.bosses_defeated, 1);
        assert_eq!(player.completed_quests.len(), 1);
        assert!(session.dungeon().is_none());
    }

    #[test]
    fn final_level_finishes_the_run_once() {
        let mut session = session(SequenceRng::constant(0.99));
        session.player_mut().dungeon_level = Session::<StaticTables, SequenceRng>::FINAL_LEVEL;
        session
            .player_mut()
            .accept_quest(Quest::new("Slayer", objective::DEFEAT_FINAL_BOSS, 1, 7, 0.0));

        let report = session.complete_level();

        assert!(report.run_finished);
        assert_eq!(report.cleared, 10);
        assert_eq!(report.reward, 550);
        assert_eq!(session.player().completed_quests.len(), 1);

        session.start_ng_plus();
        assert_eq!(session.player().ng_plus(), 1);
        assert_eq!(session.player().dungeon_level, 1);

        session.player_mut().dungeon_level = 10;
        assert!(!session.complete_level().run_finished);
    }

    #[test]
    fn classes_wait_for_their_unlock_level() {
        let mut tables = tables();
        tables.classes.push(PlayerClass::new("Warrior", 5));
        let mut session = Session::new(tables, Player::new("Tester"), SequenceRng::constant(0.5));

        assert!(!session.choose_class("warrior"));
        session.player_mut().level = 5;
        assert!(session.choose_class("warrior"));
        assert_eq!(session.player().class_name, "Warrior");
        assert!(!session.choose_class("Necromancer"));
    }

    #[test]
    fn switching_difficulty_restarts_at_level_one() {
        let mut session = session(SequenceRng::constant(0.99));
        session.player_mut().dungeon_level = 4;

        session.switch_difficulty(Difficulty::Hardcore);

        assert_eq!(session.player().difficulty, Difficulty::Hardcore);
        assert_eq!(session.player().dungeon_level, 1);
        assert_eq!(session.rooms_explored(), 0);
    }

    #[test]
    fn damage_trap_hits_unless_dodged() {
        let mut session = session(SequenceRng::constant(0.99));
        let mut trapped = room(RoomKind::Treasure, Vec::new());
        trapped.trap = Some(Trap::Damage { amount: 12.0 });

        let report = session.enter(trapped.clone(), &mut attack_only());

        assert_eq!(report.trap.map(|t| t.avoided), Some(false));
        assert_eq!(session.player().stat(StatName::Hp), 88.0);

        let mut lucky = Session::new(tables(), Player::new("Tester"), SequenceRng::new([0.1]));
        let report = lucky.enter(trapped, &mut attack_only());
        assert_eq!(report.trap.map(|t| t.avoided), Some(true));
        assert_eq!(lucky.player().stat(StatName::Hp), 100.0);
    }

    #[test]
    fn weakening_trap_lowers_a_temporary_stat() {
        let mut session = session(SequenceRng::constant(0.99));
        let mut trapped = room(RoomKind::Treasure, Vec::new());
        trapped.trap = Some(Trap::Weaken {
            stat: StatName::Attack,
            amount: 2.0,
        });

        session.enter(trapped, &mut attack_only());

        assert_eq!(session.player().stat(StatName::Attack), 3.0);
        assert_eq!(session.player().stats().permanent(StatName::Attack), 5.0);
    }

    #[test]
    fn treasure_material_joins_the_stock() {
        let mut session = session(SequenceRng::constant(0.99));
        let mut cache = room(RoomKind::Treasure, Vec::new());
        cache.material = Some("smithing_stone".into());

        let report = session.enter(cache, &mut attack_only());

        assert!(matches!(
            report.outcome,
            RoomOutcome::Treasure { material: Some(ref key), .. } if key == "smithing_stone"
        ));
        assert_eq!(session.player().materials.count("smithing_stone"), 1);
    }

    fn shop(stock: Vec<Item>) -> Room {
        Room {
            stock,
            ..Room::new(RoomKind::Shop)
        }
    }

    fn ware(name: &str, value: u32) -> Item {
        Gear::weapon(name, WeaponType::Dagger, 2.0).with_value(value).into()
    }

    #[test]
    fn shop_trades_until_the_input_leaves() {
        let mut session = session(SequenceRng::constant(0.5));
        let mut input = ScriptedRoomInput::new().with_shop([
            ShopChoice::Buy(1),
            ShopChoice::Sell(0),
            ShopChoice::Buy(0),
            ShopChoice::Leave,
            ShopChoice::Buy(0),
        ]);

        let report = session.enter(shop(vec![ware("Kris", 100), ware("Shiv", 30)]), &mut input);

        let RoomOutcome::Shop { bought, sold } = &report.outcome else {
            panic!("expected a shop, got {:?}", report.outcome);
        };
        let names = |items: &[Item]| items.iter().map(|i| i.name().to_owned()).collect::<Vec<_>>();
        // 50 - 30 + 50 for the starting potion leaves 70, short of the Kris.
        assert_eq!(names(bought.as_slice()), ["Shiv"]);
        assert_eq!(names(sold.as_slice()), ["Minor Health Potion"]);
        let player = session.player();
        assert_eq!(player.gold, 70);
        assert_eq!(player.gold_spent, 30);
        assert_eq!(player.shops_visited, 1);
        assert_eq!(player.inventory.len(), 1);
        assert!(report.survived);
    }

    #[test]
    fn shop_closes_after_its_action_limit() {
        let mut session = session(SequenceRng::constant(0.5));
        let mut input = ScriptedRoomInput::new().with_shop([ShopChoice::Buy(9); 30]);

        let report = session.enter(shop(vec![ware("Kris", 60)]), &mut input);

        assert_eq!(
            report.outcome,
            RoomOutcome::Shop {
                bought: Vec::new(),
                sold: Vec::new()
            }
        );
        // The keeper served twenty requests; ten remain queued.
        assert_eq!(
            input.shop(ShopView {
                player: session.player(),
                stock: &[]
            }),
            ShopChoice::Buy(9)
        );
    }

    #[test]
    fn puzzle_room_reports_the_solve() {
        let mut session = session(SequenceRng::constant(0.0));
        let room = Room {
            puzzle: Some(Puzzle::Number { target: 7 }),
            ..Room::new(RoomKind::Puzzle)
        };
        let mut input = ScriptedRoomInput::new().with_answers([7]);

        let report = session.enter(room, &mut input);

        let RoomOutcome::Puzzle(puzzle) = &report.outcome else {
            panic!("expected a puzzle, got {:?}", report.outcome);
        };
        assert!(puzzle.solved);
        assert_eq!(puzzle.attempts, 1);
        // U(20, 50) at the lowest roll, on dungeon level 1.
        assert_eq!(session.player().gold, 70);
        assert_eq!(session.player().puzzles_solved, 1);
        assert_eq!(session.rooms_explored(), 1);
    }

    #[test]
    fn explore_walks_the_generated_level() {
        // High rolls lay out eight puzzle rooms before the boss. Each is a dice
        // table the scripted input walks away from.
        let mut session = session(SequenceRng::constant(0.999_999));

        let report = session.explore(&mut attack_only());

        assert_eq!(report.kind, RoomKind::Puzzle);
        assert!(matches!(
            &report.outcome,
            RoomOutcome::Puzzle(p) if !p.solved && p.rewards.is_empty()
        ));
        assert_eq!(session.dungeon().map(Dungeon::remaining), Some(8));
        assert_eq!(session.rooms_explored(), 1);
    }
}
