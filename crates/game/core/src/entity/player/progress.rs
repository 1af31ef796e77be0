use super::Player;
use crate::config::GameConfig;
use crate::env::TablesOracle;
use crate::equipment::{ArmorSetTable, Equipment};
use crate::items::Inventory;
use crate::progression::{Difficulty, PlayerClass, Quest};
use crate::skills::Skill;
use crate::stats::{Layer, StatBlock, StatName, StatValues};

/// Progress parked under a difficulty while another one is played.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultySnapshot {
    pub inventory: Inventory,
    pub gold: u32,
    pub level: u32,
    pub xp: f64,
    pub max_xp: f64,
    /// Permanent layer only; the other layers are rebuilt on restore.
    pub stats: StatBlock,
    pub equipment: Equipment,
    pub skills: Vec<Skill>,
    pub dungeon_level: u32,
    pub class_name: String,
}

impl Player {
    // ========================================================================
    // Experience
    // ========================================================================

    /// Add experience and level up as many times as it covers.
    ///
    /// Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: f64) -> u32 {
        self.xp += amount.max(0.0);
        let mut gained = 0;
        while self.max_xp > 0.0 && self.xp >= self.max_xp {
            self.xp -= self.max_xp;
            self.level_up();
            gained += 1;
        }
        gained
    }

    /// Raise the level by one and apply the difficulty's growth.
    ///
    /// # Formula
    ///
    /// ```text
    /// heal      floor(max_hp / 4)
    /// mana      floor(permanent max_mana / 2)
    /// stamina   floor(permanent max_stamina / 2)
    /// max_xp    floor(max_xp * 1.5)
    /// ```
    pub fn level_up(&mut self) {
        self.level += 1;
        let bonus = self.difficulty.level_up_bonus();
        let stats = &mut self.entity.stats;
        for (stat, amount) in [
            (StatName::MaxHp, bonus.hp),
            (StatName::MaxMana, bonus.mana),
            (StatName::MaxStamina, bonus.stamina),
            (StatName::Attack, bonus.attack),
            (StatName::Defense, bonus.defense),
            (StatName::Agility, bonus.agility),
        ] {
            stats.modify_stat(stat, amount, Layer::Permanent);
        }

        stats.heal((stats.get(StatName::MaxHp) / 4.0).floor());
        stats.regen_mana((stats.permanent(StatName::MaxMana) / 2.0).floor());
        stats.rest_stamina((stats.permanent(StatName::MaxStamina) / 2.0).floor());
        self.max_xp = (self.max_xp * GameConfig::XP_GROWTH).floor();

        tracing::info!(player = %self.entity.name, level = self.level, next = self.max_xp, "level up");
    }

    // ========================================================================
    // Classes
    // ========================================================================

    /// Take a class: permanent bonuses, the class name and its skill.
    ///
    /// A skill missing from the tables is logged and skipped.
    pub fn choose_class(&mut self, class: &PlayerClass, tables: &dyn TablesOracle) {
        self.apply_class_bonuses(class);
        self.class_name = class.name.clone();

        if let Some(name) = &class.skill {
            match tables.skill(name) {
                Some(skill) => self.skills.push(skill.clone()),
                None => tracing::warn!(class = %class.name, skill = %name, "class skill not found"),
            }
        }
        tracing::info!(player = %self.entity.name, class = %class.name, "class chosen");
    }

    fn apply_class_bonuses(&mut self, class: &PlayerClass) {
        for (stat, amount) in &class.bonuses {
            self.entity.stats.modify_stat(*stat, *amount, Layer::Permanent);
        }
    }

    // ========================================================================
    // Quests
    // ========================================================================

    /// Take on a quest. A quest already active under the same title is ignored.
    pub fn accept_quest(&mut self, quest: Quest) -> bool {
        if self.quests.iter().any(|active| active.title == quest.title) {
            return false;
        }
        self.quests.push(quest);
        true
    }

    /// Advance every active quest with this objective.
    ///
    /// Quests that complete are rewarded and moved to the completed list.
    /// Returns their titles.
    pub fn update_quests(&mut self, objective: &str, amount: u32) -> Vec<String> {
        let mut finished = false;
        for quest in self.quests.iter_mut().filter(|q| q.objective_type == objective) {
            finished |= quest.update_progress(amount);
        }
        if !finished {
            return Vec::new();
        }

        let (done, open): (Vec<Quest>, Vec<Quest>) =
            std::mem::take(&mut self.quests).into_iter().partition(|q| q.completed);
        self.quests = open;

        let titles = done.iter().map(|quest| quest.title.clone()).collect();
        for quest in done {
            self.complete_quest(quest);
        }
        titles
    }

    /// Grant a quest's rewards and file it as completed.
    pub fn complete_quest(&mut self, mut quest: Quest) {
        tracing::info!(quest = %quest.title, gold = quest.reward_gold, xp = quest.reward_xp, "quest complete");
        self.gold = self.gold.saturating_add(quest.reward_gold);
        self.gain_xp(quest.reward_xp);

        if let Some(item) = quest.reward_item.take() {
            if let Err((err, item)) = self.inventory.add(item.clone()) {
                tracing::warn!(quest = %quest.title, item = %item.name(), %err, "quest reward lost");
            }
            quest.reward_item = Some(item);
        }
        quest.completed = true;
        self.completed_quests.push(quest);
    }

    // ========================================================================
    // Difficulty and NG+
    // ========================================================================

    /// Park the current progress and continue under another difficulty.
    ///
    /// The target's snapshot is restored when one exists; otherwise the
    /// character starts over at level 1 with nothing.
    pub fn switch_difficulty(&mut self, to: Difficulty, sets: &ArmorSetTable) {
        if to == self.difficulty {
            return;
        }
        let from = self.difficulty;
        let parked = self.snapshot();
        self.difficulty_data.insert(from, parked);

        match self.difficulty_data.remove(&to) {
            Some(snapshot) => self.restore(snapshot),
            None => self.restore(DifficultySnapshot::fresh()),
        }

        self.difficulty = to;
        self.inventory.set_limit(to.inventory_limit());
        self.entity.status.clear();
        self.entity.can_act = true;
        self.refresh_equipment(sets);
        tracing::info!(player = %self.entity.name, %from, %to, level = self.level, "difficulty switched");
    }

    /// Start a new cycle on the current difficulty.
    ///
    /// Level, xp, dungeon depth and permanent stats reset; the class bonuses
    /// are applied again. Class, skills, gear, inventory and gold carry over.
    pub fn start_ng_plus(&mut self, tables: &dyn TablesOracle) {
        let cycle = self.ng_plus.entry(self.difficulty).or_insert(0);
        *cycle += 1;
        let cycle = *cycle;

        self.level = GameConfig::STARTING_LEVEL;
        self.xp = 0.0;
        self.max_xp = GameConfig::STARTING_MAX_XP;
        self.dungeon_level = 1;
        self.entity.stats = Self::base_stats();
        self.entity.status.clear();
        self.entity.can_act = true;

        let class = tables
            .classes()
            .iter()
            .find(|class| class.name == self.class_name)
            .cloned();
        if let Some(class) = class {
            self.apply_class_bonuses(&class);
        }

        self.refresh_equipment(tables.armor_sets());
        tracing::info!(player = %self.entity.name, difficulty = %self.difficulty, cycle, "new game plus");
    }

    fn snapshot(&self) -> DifficultySnapshot {
        DifficultySnapshot {
            inventory: self.inventory.clone(),
            gold: self.gold,
            level: self.level,
            xp: self.xp,
            max_xp: self.max_xp,
            stats: StatBlock::from_layers(
                *self.entity.stats.layer(Layer::Permanent),
                StatValues::zeroed(),
                StatValues::zeroed(),
            ),
            equipment: self.equipment.clone(),
            skills: self.skills.clone(),
            dungeon_level: self.dungeon_level,
            class_name: self.class_name.clone(),
        }
    }

    fn restore(&mut self, snapshot: DifficultySnapshot) {
        self.inventory = snapshot.inventory;
        self.gold = snapshot.gold;
        self.level = snapshot.level;
        self.xp = snapshot.xp;
        self.max_xp = snapshot.max_xp;
        self.entity.stats = snapshot.stats;
        self.equipment = snapshot.equipment;
        self.skills = snapshot.skills;
        self.dungeon_level = snapshot.dungeon_level;
        self.class_name = snapshot.class_name;
    }
}

impl DifficultySnapshot {
    /// State of a character that never played the difficulty.
    pub fn fresh() -> Self {
        Self {
            inventory: Inventory::new(),
            gold: 0,
            level: GameConfig::STARTING_LEVEL,
            xp: 0.0,
            max_xp: GameConfig::STARTING_MAX_XP,
            stats: Player::base_stats(),
            equipment: Equipment::new(),
            skills: Vec::new(),
            dungeon_level: 1,
            class_name: Player::DEFAULT_CLASS.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::player::tests::hero;
    use crate::env::StaticTables;
    use crate::items::{ArmorType, Gear, Item, Potion, PotionEffect};
    use crate::progression::objective;

    fn tables() -> StaticTables {
        StaticTables {
            skills: vec![Skill::new("Berserk Rage", 1.5)],
            classes: vec![warrior()],
            ..StaticTables::default()
        }
    }

    fn warrior() -> PlayerClass {
        PlayerClass::new("Warrior", 5)
            .with_bonus(StatName::MaxHp, 30.0)
            .with_bonus(StatName::Attack, 5.0)
            .with_skill("Berserk Rage")
    }

    #[test]
    fn xp_loops_through_several_levels() {
        let mut player = hero();
        assert_eq!(player.gain_xp(250.0), 2);
        assert_eq!(player.level, 3);
        assert_eq!(player.xp, 0.0);
        assert_eq!(player.max_xp, 225.0);
        assert_eq!(player.stats().permanent(StatName::MaxHp), 120.0);
        assert_eq!(player.stat(StatName::Attack), 9.0);
        assert_eq!(player.stat(StatName::Agility), 7.0);
    }

    #[test]
    fn level_up_restores_part_of_the_pools() {
        let mut player = hero();
        player.entity.take_damage(60.0);
        player.entity.stats.use_mana(20.0);
        player.gain_xp(100.0);
        // max_hp 110, heal 27
        assert_eq!(player.stat(StatName::Hp), 67.0);
        // max_mana 25, regen 12
        assert_eq!(player.stat(StatName::Mana), 12.0);
    }

    #[test]
    fn hardcore_grows_slower() {
        let mut player = hero();
        player.difficulty = Difficulty::Hardcore;
        player.level_up();
        assert_eq!(player.stats().permanent(StatName::MaxHp), 103.0);
        assert_eq!(player.stat(StatName::Agility), 5.0);
    }

    #[test]
    fn class_applies_bonuses_and_skill() {
        let tables = tables();
        let mut player = hero();
        player.choose_class(&warrior(), &tables);
        assert_eq!(player.class_name, "Warrior");
        assert_eq!(player.stat(StatName::MaxHp), 130.0);
        assert_eq!(player.stat(StatName::Attack), 10.0);
        assert_eq!(player.skills.len(), 1);
    }

    #[test]
    fn class_with_unknown_skill_still_applies() {
        let mut player = hero();
        player.choose_class(&warrior().with_skill("Nope"), &StaticTables::default());
        assert_eq!(player.class_name, "Warrior");
        assert!(player.skills.is_empty());
    }

    #[test]
    fn quests_complete_and_pay_out() {
        let mut player = hero();
        let mut quest = Quest::new("Slayer", objective::KILL_ENEMIES, 2, 150, 80.0);
        quest.reward_item = Some(Item::Potion(Potion::new("Elixir", PotionEffect::Heal, 30.0)));
        assert!(player.accept_quest(quest.clone()));
        assert!(!player.accept_quest(quest));
        player.accept_quest(Quest::new("Hoarder", objective::COLLECT_GOLD, 500, 10, 1.0));

        assert!(player.update_quests(objective::KILL_ENEMIES, 1).is_empty());
        let done = player.update_quests(objective::KILL_ENEMIES, 1);

        assert_eq!(done, vec!["Slayer".to_string()]);
        assert_eq!(player.gold, 200);
        assert_eq!(player.xp, 80.0);
        assert!(player.inventory.position("Elixir").is_some());
        assert_eq!(player.quests.len(), 1);
        assert_eq!(player.completed_quests.len(), 1);
        assert!(player.completed_quests[0].completed);
    }

    #[test]
    fn switching_parks_and_restores_progress() {
        let sets = ArmorSetTable::default();
        let mut player = hero();
        player.gain_xp(120.0);
        player.gold = 999;
        player.equip(Gear::armor("Cap", ArmorType::Helmet, 3.0), &sets).unwrap();
        let defense = player.stat(StatName::Defense);

        player.switch_difficulty(Difficulty::Hardcore, &sets);
        assert_eq!(player.difficulty, Difficulty::Hardcore);
        assert_eq!((player.level, player.gold), (1, 0));
        assert!(player.inventory.is_empty());
        assert_eq!(player.inventory.limit(), Some(20));
        assert_eq!(player.class_name, Player::DEFAULT_CLASS);
        assert_eq!(player.stat(StatName::Defense), 5.0);

        player.switch_difficulty(Difficulty::Normal, &sets);
        assert_eq!((player.level, player.gold), (2, 999));
        assert_eq!(player.inventory.limit(), None);
        assert_eq!(player.stat(StatName::Defense), defense);
        assert!(player.difficulty_data.contains_key(&Difficulty::Hardcore));
    }

    #[test]
    fn ng_plus_resets_progress_but_keeps_class() {
        let tables = tables();
        let mut player = hero();
        player.choose_class(&warrior(), &tables);
        player.gain_xp(500.0);
        player.dungeon_level = 7;
        player.gold = 321;

        player.start_ng_plus(&tables);

        assert_eq!(player.ng_plus(), 1);
        assert_eq!((player.level, player.xp, player.max_xp), (1, 0.0, 100.0));
        assert_eq!(player.dungeon_level, 1);
        assert_eq!(player.gold, 321);
        assert_eq!(player.class_name, "Warrior");
        assert_eq!(player.stat(StatName::MaxHp), 130.0);
        assert_eq!(player.stat(StatName::Attack), 10.0);
        assert_eq!(player.skills.len(), 1);
    }
}
