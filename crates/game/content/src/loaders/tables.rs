//! Content tables loader: armor sets, enemies, skills, spells, classes, quests
//! and crafting, one RON file each.

use dungeon_core::progression::objective;
use dungeon_core::{
    ArmorSet, ArmorSetTable, CraftingTable, EnemyRoster, GameConfig, PlayerClass, Quest, Skill,
    Spell, StaticTables,
};

use crate::loaders::{LoadResult, parse_ron};

/// Raw text of every table file.
#[derive(Clone, Copy, Debug)]
pub struct TableSources<'a> {
    pub armor_sets: &'a str,
    pub enemies: &'a str,
    pub skills: &'a str,
    pub spells: &'a str,
    pub classes: &'a str,
    pub quests: &'a str,
    pub crafting: &'a str,
}

/// Objective names the game advances. Quests naming anything else never
/// progress.
const KNOWN_OBJECTIVES: &[&str] = &[
    objective::KILL_ENEMIES,
    objective::FIND_ITEMS,
    objective::EXPLORE_ROOMS,
    objective::COLLECT_GOLD,
    objective::USE_POTIONS,
    objective::COMPLETE_PUZZLES,
    objective::COMPLETE_DUNGEON_LEVELS,
    objective::DEFEAT_FINAL_BOSS,
];

/// Loader for the content tables.
pub struct TablesLoader;

impl TablesLoader {
    /// Parse every table and bundle them with `config`.
    pub fn parse(sources: TableSources<'_>, config: GameConfig) -> LoadResult<StaticTables> {
        let tables = StaticTables {
            config,
            armor_sets: Self::armor_sets(sources.armor_sets)?,
            enemy_roster: Self::enemy_roster(sources.enemies)?,
            skills: Self::skills(sources.skills)?,
            spells: Self::spells(sources.spells)?,
            classes: Self::classes(sources.classes)?,
            quests: Self::quests(sources.quests)?,
            crafting: Self::crafting(sources.crafting)?,
        };
        for problem in Self::validate(&tables) {
            tracing::warn!(%problem, "content inconsistency");
        }
        Ok(tables)
    }

    /// Tiers are sorted by threshold on load.
    pub fn armor_sets(text: &str) -> LoadResult<ArmorSetTable> {
        let sets: Vec<ArmorSet> = parse_ron(text, "armor sets RON")?;
        Ok(ArmorSetTable::new(sets))
    }

    /// # Errors
    ///
    /// Fails when the roster has no regular enemy, since the generator falls
    /// back to the first one.
    pub fn enemy_roster(text: &str) -> LoadResult<EnemyRoster> {
        let roster: EnemyRoster = parse_ron(text, "enemy roster RON")?;
        anyhow::ensure!(
            !roster.enemies.is_empty(),
            "enemy roster needs at least one regular enemy"
        );
        Ok(roster)
    }

    pub fn skills(text: &str) -> LoadResult<Vec<Skill>> {
        parse_ron(text, "skills RON")
    }

    pub fn spells(text: &str) -> LoadResult<Vec<Spell>> {
        parse_ron(text, "spells RON")
    }

    pub fn classes(text: &str) -> LoadResult<Vec<PlayerClass>> {
        parse_ron(text, "classes RON")
    }

    /// Progress and completion flags are reset whatever the file says.
    pub fn quests(text: &str) -> LoadResult<Vec<Quest>> {
        let mut quests: Vec<Quest> = parse_ron(text, "quests RON")?;
        for quest in &mut quests {
            quest.progress = 0;
            quest.completed = false;
        }
        Ok(quests)
    }

    /// # Errors
    ///
    /// Fails on a duplicate recipe key, since recipes are looked up by key.
    pub fn crafting(text: &str) -> LoadResult<CraftingTable> {
        let table: CraftingTable = parse_ron(text, "crafting RON")?;
        for (index, recipe) in table.recipes.iter().enumerate() {
            anyhow::ensure!(
                !table.recipes[..index].iter().any(|r| r.key == recipe.key),
                "duplicate recipe key {}",
                recipe.key
            );
        }
        Ok(table)
    }

    /// Cross-table references that do not resolve. None of them are fatal.
    pub fn validate(tables: &StaticTables) -> Vec<String> {
        let mut problems = Vec::new();

        for class in &tables.classes {
            if let Some(skill) = &class.skill
                && !tables.skills.iter().any(|s| &s.name == skill)
            {
                problems.push(format!("class {} grants unknown skill {skill}", class.name));
            }
        }

        let roster = &tables.enemy_roster;
        for set in tables.armor_sets.iter() {
            if let Some(enemy_type) = &set.enemy_type
                && !roster
                    .enemies
                    .iter()
                    .chain(&roster.bosses)
                    .any(|t| &t.enemy_type == enemy_type)
            {
                problems.push(format!("set {} is worn by unknown enemy type {enemy_type}", set.name));
            }
        }

        for quest in &tables.quests {
            if !KNOWN_OBJECTIVES.contains(&quest.objective_type.as_str()) {
                problems.push(format!(
                    "quest {} tracks unknown objective {}",
                    quest.title, quest.objective_type
                ));
            }
        }

        let crafting = &tables.crafting;
        for recipe in &crafting.recipes {
            for material in recipe.ingredients.keys() {
                if crafting.material(material).is_none() {
                    problems.push(format!("recipe {} needs unknown material {material}", recipe.key));
                }
            }
        }

        problems
    }
}
