//! Turn loop for one room's fight.
//!
//! The [`CombatController`] is the only place combat state changes. Each round
//! runs the player's turn, resolves defeats, then lets the front enemy act:
//!
//! ```text
//! PlayerTurn -> ResolvePlayerAction -> EnemyDefeatedCheck
//!            -> EnemyTurn -> ResolveEnemyAction -> PlayerDefeatedCheck -> ...
//! ```
//!
//! Every step is recorded as a [`CombatEvent`]; presentation is left to the
//! caller.

use super::event::{CombatError, CombatEvent, CombatOutcome};
use super::formulas;
use super::input::{CombatInput, CombatView, PlayerChoice};
use crate::entity::{Enemy, Player, TickReport};
use crate::env::{RngOracle, TablesOracle};
use crate::equipment::Slot;
use crate::items::Gear;
use crate::loot::{ItemFactory, LootRequest};
use crate::progression::objective;
use crate::skills::{SkillError, SpellError};
use crate::stats::{ResourceKind, StatName};

/// Everything a finished fight produced.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    pub events: Vec<CombatEvent>,
    pub rounds: u32,
}

/// How the player's turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Turn {
    Acted,
    /// The choice did not use the turn; ask again.
    Reprompt,
    Fled,
}

pub struct CombatController<'a> {
    tables: &'a dyn TablesOracle,
    rng: &'a mut dyn RngOracle,
    events: Vec<CombatEvent>,
    verbose: bool,
}

impl<'a> CombatController<'a> {
    pub fn new(tables: &'a dyn TablesOracle, rng: &'a mut dyn RngOracle) -> Self {
        Self {
            tables,
            rng,
            events: Vec::new(),
            verbose: tables.config().verbose_combat,
        }
    }

    /// Fight until the player wins, dies or escapes.
    ///
    /// Dead enemies are dropped from `enemies` as they fall; on victory the
    /// vector is empty.
    ///
    /// # Errors
    ///
    /// [`CombatError::NoEnemies`] when no living enemy is present. The player
    /// is untouched in that case.
    pub fn run(
        &mut self,
        player: &mut Player,
        enemies: &mut Vec<Enemy>,
        input: &mut dyn CombatInput,
    ) -> Result<CombatReport, CombatError> {
        enemies.retain(Enemy::is_alive);
        if enemies.is_empty() {
            return Err(CombatError::NoEnemies);
        }

        let can_flee = !enemies.iter().any(|enemy| enemy.is_boss);
        for enemy in enemies.iter() {
            self.events.push(CombatEvent::Encounter {
                enemy: enemy.name().to_owned(),
                is_boss: enemy.is_boss,
            });
        }
        tracing::info!(
            player = %player.name(),
            enemies = enemies.len(),
            can_flee,
            "combat started"
        );

        let mut round = 0;
        let outcome = loop {
            round += 1;

            if self.player_turn(player, enemies, input, can_flee, round) == Turn::Fled {
                break CombatOutcome::Fled;
            }
            if !player.is_alive() {
                self.events.push(CombatEvent::PlayerDefeated);
                break CombatOutcome::Defeat;
            }
            self.collect_defeated(player, enemies);
            if enemies.is_empty() {
                break CombatOutcome::Victory;
            }

            self.enemy_turn(player, enemies);
            if !player.is_alive() {
                self.events.push(CombatEvent::PlayerDefeated);
                break CombatOutcome::Defeat;
            }
            self.collect_defeated(player, enemies);
            if enemies.is_empty() {
                break CombatOutcome::Victory;
            }
        };

        tracing::info!(
            player = %player.name(),
            %outcome,
            rounds = round,
            hp = player.stat(StatName::Hp),
            "combat finished"
        );
        Ok(CombatReport {
            outcome,
            events: std::mem::take(&mut self.events),
            rounds: round,
        })
    }

    // ========================================================================
    // Player turn
    // ========================================================================

    fn player_turn(
        &mut self,
        player: &mut Player,
        enemies: &mut [Enemy],
        input: &mut dyn CombatInput,
        can_flee: bool,
        round: u32,
    ) -> Turn {
        let frozen = !player.entity.can_act;
        if frozen {
            self.events.push(CombatEvent::Frozen {
                who: player.name().to_owned(),
            });
        }
        let tick = player.entity.process_status_effects();
        self.record_tick(player.name(), tick);
        if frozen || !player.is_alive() {
            return Turn::Acted;
        }

        loop {
            let Some(front) = enemies.first() else {
                return Turn::Acted;
            };
            let choice = input.choose(CombatView {
                player: &*player,
                enemy: front,
                can_flee,
                round,
            });
            if self.verbose {
                tracing::debug!(round, ?choice, "player choice");
            }

            let turn = match choice {
                PlayerChoice::Attack => self.attack(player, enemies),
                PlayerChoice::Skill(index) => self.use_skill(player, enemies, index),
                PlayerChoice::Item(index) => self.use_item(player, index),
                PlayerChoice::Spell(index) => self.cast_spell(player, enemies, index),
                PlayerChoice::Run => self.try_flee(player, can_flee),
                PlayerChoice::Invalid => {
                    self.events.push(CombatEvent::InvalidChoice);
                    Turn::Reprompt
                }
            };
            if turn != Turn::Reprompt {
                return turn;
            }
        }
    }

    fn attack(&mut self, player: &mut Player, enemies: &mut [Enemy]) -> Turn {
        let tables = self.tables;
        let combat = &tables.config().combat;
        let Some(target) = enemies.first_mut() else {
            return Turn::Acted;
        };

        let weapon_type = player.equipment.get(Slot::MainHand).and_then(Gear::weapon_type);
        let mut damage = player.total_damage();
        if let Some(weapon_type) = weapon_type {
            damage *= player.masteries.bonus(weapon_type).damage_multiplier;
        }

        let crit = formulas::crit_chance(
            combat,
            player.stat(StatName::Luck),
            player.stat(StatName::CriticalChance),
        );
        let critical = self.rng.chance(crit);
        player.attack_count += 1;
        if critical {
            damage *= combat.crit_multiplier;
            player.critical_count += 1;
        }

        let cost = formulas::stamina_cost(combat, &player.equipment);
        let exhausted = player.entity.stats.pool(ResourceKind::Stamina) < cost;
        if exhausted {
            damage *= combat.exhausted_multiplier;
        } else {
            player.entity.stats.use_stamina(cost);
        }

        let damage = player.difficulty.modify_damage_dealt(damage);
        let dealt = target.entity.take_damage(damage).total();
        player.damage_dealt += dealt;
        if let Some(weapon_type) = weapon_type {
            player.masteries.gain_xp(weapon_type, combat.mastery_xp_per_hit);
        }

        if self.verbose {
            tracing::debug!(target = %target.name(), crit, critical, exhausted, dealt, "player attack");
        }
        self.events.push(CombatEvent::PlayerAttack {
            target: target.name().to_owned(),
            damage: dealt,
            critical,
            exhausted,
        });
        Turn::Acted
    }

    /// Skill damage: `int(total_damage * multiplier)`, doubled on a skill crit.
    fn use_skill(&mut self, player: &mut Player, enemies: &mut [Enemy], index: usize) -> Turn {
        let tables = self.tables;
        let combat = &tables.config().combat;
        let Some(skill) = player.skills.get(index).cloned() else {
            self.events.push(CombatEvent::SkillFailed {
                skill: format!("#{index}"),
                reason: SkillError::UnknownSkill(index),
            });
            return Turn::Reprompt;
        };
        let Some(target) = enemies.first_mut() else {
            return Turn::Acted;
        };

        let multiplier = match skill.activate(&mut player.entity) {
            Ok(multiplier) => multiplier,
            Err(reason) => {
                self.events.push(CombatEvent::SkillFailed {
                    skill: skill.name,
                    reason,
                });
                return Turn::Reprompt;
            }
        };

        let mut base = player.total_damage();
        let critical = self
            .rng
            .chance(formulas::skill_crit_chance(combat, player.stat(StatName::Luck)));
        player.attack_count += 1;
        if critical {
            base *= combat.crit_multiplier;
            player.critical_count += 1;
        }

        let damage = player.difficulty.modify_damage_dealt((base * multiplier).floor());
        let dealt = if damage > 0.0 {
            target.entity.take_damage(damage).total()
        } else {
            0.0
        };
        player.damage_dealt += dealt;

        self.events.push(CombatEvent::SkillUsed {
            skill: skill.name,
            target: target.name().to_owned(),
            damage: dealt,
            critical,
        });
        Turn::Acted
    }

    /// `index` counts potions only, in inventory order.
    fn use_item(&mut self, player: &mut Player, index: usize) -> Turn {
        let slots = player.inventory.potion_slots();
        if slots.is_empty() {
            self.events.push(CombatEvent::NoUsableItems);
            return Turn::Reprompt;
        }
        let Some(&slot) = slots.get(index) else {
            self.events.push(CombatEvent::InvalidChoice);
            return Turn::Reprompt;
        };

        let potion = player
            .inventory
            .get(slot)
            .map(|item| item.name().to_owned())
            .unwrap_or_default();
        match player.use_potion(slot, &mut *self.rng) {
            Ok(outcome) => {
                self.events.push(CombatEvent::PotionUsed { potion, outcome });
                Turn::Acted
            }
            Err(err) => {
                tracing::warn!(%err, slot, "potion slot vanished");
                self.events.push(CombatEvent::InvalidChoice);
                Turn::Reprompt
            }
        }
    }

    fn cast_spell(&mut self, player: &mut Player, enemies: &mut [Enemy], index: usize) -> Turn {
        let Some(name) = player.spells.get(index).map(|spell| spell.name.clone()) else {
            self.events.push(CombatEvent::SpellFailed {
                spell: format!("#{index}"),
                reason: SpellError::UnknownSpell(format!("#{index}")),
            });
            return Turn::Reprompt;
        };

        match player.cast_spell(&name, enemies, &mut *self.rng) {
            Ok(report) => {
                player.damage_dealt += report.damage;
                self.events.push(CombatEvent::SpellCast {
                    spell: name,
                    report,
                });
                Turn::Acted
            }
            Err(reason) => {
                self.events.push(CombatEvent::SpellFailed {
                    spell: name,
                    reason,
                });
                Turn::Reprompt
            }
        }
    }

    fn try_flee(&mut self, player: &Player, can_flee: bool) -> Turn {
        if !can_flee {
            self.events.push(CombatEvent::InvalidChoice);
            return Turn::Reprompt;
        }
        let tables = self.tables;
        let chance = formulas::flee_chance(&tables.config().combat, player.stat(StatName::Luck));
        if self.rng.chance(chance) {
            self.events.push(CombatEvent::Fled);
            Turn::Fled
        } else {
            self.events.push(CombatEvent::FleeFailed);
            Turn::Acted
        }
    }

    // ========================================================================
    // Enemy turn
    // ========================================================================

    /// The front enemy acts; the rest wait their turn in line.
    fn enemy_turn(&mut self, player: &mut Player, enemies: &mut [Enemy]) {
        let tables = self.tables;
        let combat = &tables.config().combat;
        let Some(enemy) = enemies.first_mut() else {
            return;
        };

        let frozen = !enemy.entity.can_act;
        if frozen {
            self.events.push(CombatEvent::Frozen {
                who: enemy.name().to_owned(),
            });
        }
        let tick = enemy.entity.process_status_effects();
        self.record_tick(enemy.name(), tick);
        if frozen || !enemy.is_alive() {
            return;
        }

        let dodge = formulas::dodge_chance(
            combat,
            player.stat(StatName::Luck),
            player.stat(StatName::Agility),
        );
        if self.rng.chance(dodge) {
            self.events.push(CombatEvent::Dodged {
                enemy: enemy.name().to_owned(),
            });
            return;
        }

        let damage = formulas::mitigated_damage(
            combat,
            enemy.attack(),
            player.stat(StatName::Defense),
            player.entity.stats.equipment(StatName::Defense),
        );
        let damage = player.difficulty.modify_damage_taken(damage);
        let taken = player.entity.take_damage(damage).total();
        player.damage_taken += taken;

        if self.verbose {
            tracing::debug!(enemy = %enemy.name(), dodge, taken, "enemy attack");
        }
        self.events.push(CombatEvent::EnemyAttack {
            enemy: enemy.name().to_owned(),
            damage: taken,
        });
    }

    fn record_tick(&mut self, who: &str, tick: TickReport) {
        if tick.damage > 0.0 || !tick.expired.is_empty() {
            self.events.push(CombatEvent::StatusTick {
                who: who.to_owned(),
                damage: tick.damage,
                expired: tick.expired,
            });
        }
    }

    // ========================================================================
    // Defeats and rewards
    // ========================================================================

    fn collect_defeated(&mut self, player: &mut Player, enemies: &mut Vec<Enemy>) {
        if enemies.iter().all(Enemy::is_alive) {
            return;
        }
        let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
            std::mem::take(enemies).into_iter().partition(|enemy| !enemy.is_alive());
        *enemies = alive;

        for enemy in &dead {
            self.reward(player, enemy);
        }
        if let Some(next) = enemies.first() {
            self.events.push(CombatEvent::NextEnemy {
                enemy: next.name().to_owned(),
            });
        }
    }

    fn reward(&mut self, player: &mut Player, enemy: &Enemy) {
        let completed_before = player.completed_quests.len();

        player.gold = player.gold.saturating_add(enemy.gold_reward);
        player.record_kill(enemy.is_boss);
        self.events.push(CombatEvent::EnemyDefeated {
            enemy: enemy.name().to_owned(),
            xp: enemy.xp_reward,
            gold: enemy.gold_reward,
        });
        tracing::info!(enemy = %enemy.name(), boss = enemy.is_boss, xp = enemy.xp_reward, gold = enemy.gold_reward, "enemy defeated");

        if player.gain_xp(enemy.xp_reward) > 0 {
            self.events.push(CombatEvent::LevelUp { level: player.level });
        }
        self.roll_loot(player, enemy);

        player.update_quests(objective::KILL_ENEMIES, 1);
        if enemy.gold_reward > 0 {
            player.update_quests(objective::COLLECT_GOLD, enemy.gold_reward);
        }
        let titles: Vec<String> = player.completed_quests[completed_before..]
            .iter()
            .map(|quest| quest.title.clone())
            .collect();
        for title in titles {
            self.events.push(CombatEvent::QuestCompleted { title });
        }
    }

    /// Bosses always drop with a rarity boost; others roll the drop chance.
    fn roll_loot(&mut self, player: &mut Player, enemy: &Enemy) {
        let tables = self.tables;
        let combat = &tables.config().combat;

        let request = LootRequest::default().from_enemy(&enemy.enemy_type);
        let request = if enemy.is_boss {
            request.with_rarity_boost(combat.boss_rarity_boost)
        } else {
            let chance = formulas::drop_chance(combat, player.stat(StatName::Luck));
            if !self.rng.chance(chance) {
                return;
            }
            request
        };

        let item = ItemFactory::new(tables.armor_sets()).generate_random_item(
            player,
            &mut *self.rng,
            request,
        );
        match player.pick_up(item.clone()) {
            Ok(()) => self.events.push(CombatEvent::LootDropped { item }),
            Err((err, item)) => {
                tracing::warn!(item = %item.name(), %err, "loot left behind");
                self.events.push(CombatEvent::LootLost { item });
            }
        }
    }
}
