//! Content factory for building the tables from data files.

use std::path::{Path, PathBuf};

use dungeon_core::{GameConfig, StaticTables};

use crate::loaders::tables::TableSources;
use crate::loaders::{ConfigLoader, LoadResult, TablesLoader, read_file};

const ARMOR_SETS: &str = include_str!("../../data/armor_sets.ron");
const ENEMIES: &str = include_str!("../../data/enemies.ron");
const SKILLS: &str = include_str!("../../data/skills.ron");
const SPELLS: &str = include_str!("../../data/spells.ron");
const CLASSES: &str = include_str!("../../data/classes.ron");
const QUESTS: &str = include_str!("../../data/quests.ron");
const CRAFTING: &str = include_str!("../../data/crafting.ron");
const CONFIG: &str = include_str!("../../data/config.toml");

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── armor_sets.ron
/// ├── enemies.ron
/// ├── skills.ron
/// ├── spells.ron
/// ├── classes.ron
/// ├── quests.ron
/// └── crafting.ron
/// ```
///
/// A missing `config.toml` falls back to the defaults; every table file is
/// required.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The shipped content, compiled into the binary.
    pub fn embedded() -> LoadResult<StaticTables> {
        let config = ConfigLoader::parse(CONFIG)?;
        TablesLoader::parse(
            TableSources {
                armor_sets: ARMOR_SETS,
                enemies: ENEMIES,
                skills: SKILLS,
                spells: SPELLS,
                classes: CLASSES,
                quests: QUESTS,
                crafting: CRAFTING,
            },
            config,
        )
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every table from the data directory.
    pub fn load_tables(&self) -> LoadResult<StaticTables> {
        let config = self.load_config()?;
        let armor_sets = self.read("armor_sets.ron")?;
        let enemies = self.read("enemies.ron")?;
        let skills = self.read("skills.ron")?;
        let spells = self.read("spells.ron")?;
        let classes = self.read("classes.ron")?;
        let quests = self.read("quests.ron")?;
        let crafting = self.read("crafting.ron")?;

        let tables = TablesLoader::parse(
            TableSources {
                armor_sets: &armor_sets,
                enemies: &enemies,
                skills: &skills,
                spells: &spells,
                classes: &classes,
                quests: &quests,
                crafting: &crafting,
            },
            config,
        )?;
        tracing::info!(
            dir = %self.data_dir.display(),
            sets = tables.armor_sets.iter().count(),
            enemies = tables.enemy_roster.enemies.len(),
            bosses = tables.enemy_roster.bosses.len(),
            recipes = tables.crafting.recipes.len(),
            "content loaded"
        );
        Ok(tables)
    }

    fn read(&self, file: &str) -> LoadResult<String> {
        read_file(&self.data_dir.join(file))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dungeon_core::{SequenceRng, TablesOracle};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn shipped_content_parses_and_is_consistent() {
        let tables = ContentFactory::embedded().unwrap();
        assert_eq!(tables.armor_sets.iter().count(), 12);
        assert_eq!(tables.enemy_roster.enemies.len(), 12);
        assert_eq!(tables.enemy_roster.bosses.len(), 12);
        assert_eq!(tables.skills.len(), 6);
        assert_eq!(tables.spells.len(), 15);
        assert_eq!(tables.classes.len(), 8);
        assert_eq!(tables.quests.len(), 8);
        assert_eq!(tables.crafting.materials.len(), 7);
        assert_eq!(tables.crafting.recipes.len(), 5);
        assert_eq!(tables.config, GameConfig::default());
        assert!(TablesLoader::validate(&tables).is_empty());
    }

    #[test]
    fn shipped_content_answers_lookups() {
        let tables = ContentFactory::embedded().unwrap();
        let brigand = tables.armor_sets().for_enemy("Goblin").unwrap();
        assert_eq!(brigand.name, "Brigand");
        assert_eq!(brigand.weapon.as_ref().map(|w| w.name.as_str()), Some("Goblin Dagger"));
        assert!(tables.spell("fireball").is_some());
        assert_eq!(tables.skill("Arcane Blast").map(|s| s.damage_multiplier), Some(2.5));

        let boss = tables
            .enemy_roster()
            .generate(1, true, 0, &mut SequenceRng::constant(0.0))
            .unwrap();
        assert_eq!(boss.name(), "Goblin King");
        assert!(boss.is_boss);
    }

    #[test]
    fn directory_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let files = [
            "armor_sets.ron",
            "enemies.ron",
            "skills.ron",
            "spells.ron",
            "classes.ron",
            "quests.ron",
            "crafting.ron",
        ];
        for file in files {
            std::fs::copy(data.join(file), dir.path().join(file)).unwrap();
        }

        let tables = ContentFactory::new(dir.path()).load_tables().unwrap();
        assert_eq!(tables.config, GameConfig::default());
        assert_eq!(tables.quests.len(), 8);
    }

    #[test]
    fn missing_table_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_tables().unwrap_err();
        assert!(err.to_string().contains("armor_sets.ron"));
    }
}
