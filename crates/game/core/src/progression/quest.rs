//! Quests: counters toward an objective with a one-time reward.

use crate::items::Item;

/// Objective counters the game advances. Data files may name others; those
/// quests simply never progress.
pub mod objective {
    pub const KILL_ENEMIES: &str = "kill_enemies";
    pub const FIND_ITEMS: &str = "find_items";
    pub const EXPLORE_ROOMS: &str = "explore_rooms";
    pub const COLLECT_GOLD: &str = "collect_gold";
    pub const USE_POTIONS: &str = "use_potions";
    pub const COMPLETE_PUZZLES: &str = "complete_puzzles";
    pub const COMPLETE_DUNGEON_LEVELS: &str = "complete_dungeon_levels";
    pub const DEFEAT_FINAL_BOSS: &str = "defeat_final_boss";
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub objective_type: String,
    pub objective_amount: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub progress: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
    pub reward_gold: u32,
    pub reward_xp: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_item: Option<Item>,
}

impl Quest {
    pub fn new(
        title: impl Into<String>,
        objective_type: impl Into<String>,
        objective_amount: u32,
        reward_gold: u32,
        reward_xp: f64,
    ) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            objective_type: objective_type.into(),
            objective_amount,
            progress: 0,
            completed: false,
            reward_gold,
            reward_xp,
            reward_item: None,
        }
    }

    /// Advance progress. True exactly once, on the call that completes it.
    pub fn update_progress(&mut self, amount: u32) -> bool {
        self.progress = self.progress.saturating_add(amount);
        if self.progress >= self.objective_amount && !self.completed {
            self.completed = true;
            return true;
        }
        false
    }
}

impl core::fmt::Display for Quest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.completed {
            write!(f, "{} (COMPLETED)", self.title)
        } else {
            write!(f, "{} ({}/{})", self.title, self.progress, self.objective_amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_fires_once() {
        let mut quest = Quest::new("Slayer", objective::KILL_ENEMIES, 2, 150, 80.0);
        assert!(!quest.update_progress(1));
        assert!(quest.update_progress(1));
        assert!(!quest.update_progress(1));
        assert!(quest.completed);
        assert_eq!(quest.to_string(), "Slayer (COMPLETED)");
    }
}
