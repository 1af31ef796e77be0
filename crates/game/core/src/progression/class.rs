//! Class specializations offered at fixed levels.

use std::collections::BTreeMap;

use crate::stats::StatName;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerClass {
    pub name: String,
    /// Player level at which the class is offered.
    pub unlock_level: u32,
    /// Permanent stat bonuses applied once on selection.
    pub bonuses: BTreeMap<StatName, f64>,
    /// Skill granted on selection, looked up in the skill table.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill: Option<String>,
}

impl PlayerClass {
    pub fn new(name: impl Into<String>, unlock_level: u32) -> Self {
        Self {
            name: name.into(),
            unlock_level,
            bonuses: BTreeMap::new(),
            skill: None,
        }
    }

    #[must_use]
    pub fn with_bonus(mut self, stat: StatName, amount: f64) -> Self {
        self.bonuses.insert(stat, amount);
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }
}

/// Classes offered at exactly `level`.
pub fn unlocked_at(classes: &[PlayerClass], level: u32) -> impl Iterator<Item = &PlayerClass> {
    classes.iter().filter(move |class| class.unlock_level == level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_unlock_at_their_level_only() {
        let classes = vec![
            PlayerClass::new("Warrior", 5),
            PlayerClass::new("Mage", 5),
            PlayerClass::new("Rogue", 10),
        ];
        let names: Vec<_> = unlocked_at(&classes, 5).map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Warrior", "Mage"]);
        assert_eq!(unlocked_at(&classes, 6).count(), 0);
    }
}
