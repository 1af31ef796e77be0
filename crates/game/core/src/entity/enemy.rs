//! Enemies and the level-scaled generator that produces them.

use crate::env::RngOracle;
use crate::stats::{Layer, StatBlock, StatName};

use super::Entity;

/// Enemy archetype loaded from content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    /// Type tag used for set-aware loot (`Goblin`, `Dark Elf`, ...).
    pub enemy_type: String,
    pub hp_mod: f64,
    pub atk_mod: f64,
    pub def_mod: f64,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub agl_mod: f64,
    pub min_level: u32,
}

#[cfg(feature = "serde")]
const fn one() -> f64 {
    1.0
}

/// Regular enemies and bosses available to the generator.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyRoster {
    pub enemies: Vec<EnemyTemplate>,
    pub bosses: Vec<EnemyTemplate>,
}

/// A generated opponent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub entity: Entity,
    pub xp_reward: f64,
    pub gold_reward: u32,
    /// Rough threat rating: dungeon level, plus three for bosses.
    pub difficulty: u32,
    pub enemy_type: String,
    pub is_boss: bool,
}

impl Enemy {
    /// Enemy with explicit stats and no rewards.
    pub fn new(name: impl Into<String>, hp: f64, attack: f64, defense: f64) -> Self {
        Self {
            entity: Entity::new(name, StatBlock::with_base(hp, hp, attack, defense)),
            xp_reward: 0.0,
            gold_reward: 0,
            difficulty: 1,
            enemy_type: String::new(),
            is_boss: false,
        }
    }

    #[must_use]
    pub fn with_rewards(mut self, xp: f64, gold: u32) -> Self {
        self.xp_reward = xp;
        self.gold_reward = gold;
        self
    }

    #[must_use]
    pub fn with_type(mut self, enemy_type: impl Into<String>) -> Self {
        self.enemy_type = enemy_type.into();
        self
    }

    #[must_use]
    pub fn as_boss(mut self) -> Self {
        self.is_boss = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.entity.name
    }

    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    pub fn attack(&self) -> f64 {
        self.entity.stats.get(StatName::Attack)
    }
}

impl EnemyRoster {
    /// Candidates for `level`.
    ///
    /// Regular enemies qualify when `min_level <= level`; bosses only on an
    /// exact level match. With no candidate the first regular enemy is used.
    fn candidates(&self, level: u32, is_boss: bool) -> Vec<&EnemyTemplate> {
        let found: Vec<_> = if is_boss {
            self.bosses.iter().filter(|t| t.min_level == level).collect()
        } else {
            self.enemies.iter().filter(|t| t.min_level <= level).collect()
        };
        if found.is_empty() {
            self.enemies.first().into_iter().collect()
        } else {
            found
        }
    }

    /// Build a level-scaled enemy.
    ///
    /// # Formula
    ///
    /// ```text
    /// hp      = int((20 + 10L) * hp_mod)     boss: x2
    /// attack  = int((5 + 2L) * atk_mod)      boss: int(x1.5)
    /// defense = int((2 + L) * def_mod)       boss: int(x1.5)
    /// ng      = max(1, ng_plus * 0.1)        applied to all three
    /// xp      = 10L (boss x2), gold = 5L (boss x3)
    /// ```
    ///
    /// Templates are weighted by `1 / (1 + L - min_level)`, favouring those
    /// introduced closest to the current level.
    ///
    /// # Returns
    ///
    /// `None` only when the roster has no regular enemies at all.
    pub fn generate(
        &self,
        level: u32,
        is_boss: bool,
        ng_plus: u32,
        rng: &mut dyn RngOracle,
    ) -> Option<Enemy> {
        let candidates = self.candidates(level, is_boss);
        let weights: Vec<f64> = candidates
            .iter()
            .map(|t| 1.0 / (1.0 + level.saturating_sub(t.min_level) as f64))
            .collect();
        let template = candidates.get(rng.weighted_index(&weights)?)?;

        let l = level as f64;
        let mut hp = ((20.0 + 10.0 * l) * template.hp_mod).floor();
        let mut attack = ((5.0 + 2.0 * l) * template.atk_mod).floor();
        let mut defense = ((2.0 + l) * template.def_mod).floor();
        if is_boss {
            hp *= 2.0;
            attack = (attack * 1.5).floor();
            defense = (defense * 1.5).floor();
        }
        let ng = (ng_plus as f64 * 0.1).max(1.0);
        hp = (hp * ng).floor();
        attack = (attack * ng).floor();
        defense = (defense * ng).floor();

        let mut stats = StatBlock::with_base(hp, hp, attack, defense);
        let agility = stats.permanent(StatName::Agility) * template.agl_mod;
        stats.set_stat(StatName::Agility, agility, Layer::Permanent);

        let (xp, gold, difficulty) = if is_boss {
            (20.0 * l, 15 * level, level + 3)
        } else {
            (10.0 * l, 5 * level, level)
        };

        tracing::debug!(
            name = %template.name,
            level,
            is_boss,
            hp,
            attack,
            defense,
            "enemy generated"
        );

        Some(Enemy {
            entity: Entity::new(template.name.clone(), stats),
            xp_reward: xp,
            gold_reward: gold,
            difficulty,
            enemy_type: template.enemy_type.clone(),
            is_boss,
        })
    }
}
