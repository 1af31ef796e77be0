use crate::config::GameConfig;
use crate::crafting::CraftingTable;
use crate::entity::EnemyRoster;
use crate::equipment::ArmorSetTable;
use crate::progression::{PlayerClass, Quest};
use crate::skills::{Skill, Spell};

/// Oracle providing content tables.
///
/// Defines what exists in the game (sets, enemies, skills, spells, classes,
/// quests, crafting) and the balance config. It holds no per-run state.
pub trait TablesOracle {
    fn config(&self) -> &GameConfig;
    fn armor_sets(&self) -> &ArmorSetTable;
    fn enemy_roster(&self) -> &EnemyRoster;
    fn skills(&self) -> &[Skill];
    fn spells(&self) -> &[Spell];
    fn classes(&self) -> &[PlayerClass];
    /// Quests offered to a new character, all at zero progress.
    fn quests(&self) -> &[Quest];
    fn crafting(&self) -> &CraftingTable;

    fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills().iter().find(|skill| skill.name == name)
    }

    /// Case-insensitive spell lookup.
    fn spell(&self, name: &str) -> Option<&Spell> {
        self.spells()
            .iter()
            .find(|spell| spell.name.eq_ignore_ascii_case(name))
    }
}

/// In-memory tables, built by the content loaders or by hand in tests.
#[derive(Clone, Debug, Default)]
pub struct StaticTables {
    pub config: GameConfig,
    pub armor_sets: ArmorSetTable,
    pub enemy_roster: EnemyRoster,
    pub skills: Vec<Skill>,
    pub spells: Vec<Spell>,
    pub classes: Vec<PlayerClass>,
    pub quests: Vec<Quest>,
    pub crafting: CraftingTable,
}

impl StaticTables {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TablesOracle for StaticTables {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn armor_sets(&self) -> &ArmorSetTable {
        &self.armor_sets
    }

    fn enemy_roster(&self) -> &EnemyRoster {
        &self.enemy_roster
    }

    fn skills(&self) -> &[Skill] {
        &self.skills
    }

    fn spells(&self) -> &[Spell] {
        &self.spells
    }

    fn classes(&self) -> &[PlayerClass] {
        &self.classes
    }

    fn quests(&self) -> &[Quest] {
        &self.quests
    }

    fn crafting(&self) -> &CraftingTable {
        &self.crafting
    }
}
