//! What happened during a fight, for presentation and tests.

use crate::entity::PotionOutcome;
use crate::error::{ErrorSeverity, GameError};
use crate::items::Item;
use crate::skills::{SkillError, SpellError, SpellReport};

/// How a fight ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

impl CombatOutcome {
    /// Whether the player walks out of the room.
    pub const fn survived(self) -> bool {
        !matches!(self, Self::Defeat)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("combat needs at least one living enemy")]
    NoEnemies,
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEnemies => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEnemies => "COMBAT_NO_ENEMIES",
        }
    }
}

/// One step of the fight, in order of occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatEvent {
    Encounter {
        enemy: String,
        is_boss: bool,
    },

    // ===== status =====
    StatusTick {
        who: String,
        damage: f64,
        expired: Vec<&'static str>,
    },
    Frozen {
        who: String,
    },

    // ===== player actions =====
    PlayerAttack {
        target: String,
        damage: f64,
        critical: bool,
        exhausted: bool,
    },
    SkillUsed {
        skill: String,
        target: String,
        damage: f64,
        critical: bool,
    },
    SkillFailed {
        skill: String,
        reason: SkillError,
    },
    PotionUsed {
        potion: String,
        outcome: PotionOutcome,
    },
    SpellCast {
        spell: String,
        report: SpellReport,
    },
    SpellFailed {
        spell: String,
        reason: SpellError,
    },
    NoUsableItems,
    InvalidChoice,
    FleeFailed,
    Fled,

    // ===== rewards =====
    EnemyDefeated {
        enemy: String,
        xp: f64,
        gold: u32,
    },
    LevelUp {
        level: u32,
    },
    LootDropped {
        item: Item,
    },
    LootLost {
        item: Item,
    },
    QuestCompleted {
        title: String,
    },
    NextEnemy {
        enemy: String,
    },

    // ===== enemy actions =====
    EnemyAttack {
        enemy: String,
        damage: f64,
    },
    Dodged {
        enemy: String,
    },
    PlayerDefeated,
}
