/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Combat probabilities and costs.
    pub combat: CombatTables,
    /// Starting gold for a new character.
    pub starting_gold: u32,
    /// Emit per-roll debug records during combat.
    ///
    /// Replaces a process-wide debug level; the subscriber filter still
    /// decides what reaches the output.
    pub verbose_combat: bool,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Distinct status effects that can be active at once.
    pub const MAX_STATUS_EFFECTS: usize = 8;
    /// Player level at which a fresh character starts.
    pub const STARTING_LEVEL: u32 = 1;
    /// Experience needed for the first level-up.
    pub const STARTING_MAX_XP: f64 = 100.0;
    /// Growth factor applied to the xp threshold on every level-up.
    pub const XP_GROWTH: f64 = 1.5;
    /// Permanent attack of a fresh player (entities default to 10).
    pub const PLAYER_BASE_ATTACK: f64 = 5.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARTING_GOLD: u32 = 50;

    pub fn new() -> Self {
        Self {
            combat: CombatTables::default(),
            starting_gold: Self::DEFAULT_STARTING_GOLD,
            verbose_combat: false,
        }
    }

    #[must_use]
    pub fn with_combat(mut self, combat: CombatTables) -> Self {
        self.combat = combat;
        self
    }

    #[must_use]
    pub fn with_verbose_combat(mut self, verbose: bool) -> Self {
        self.verbose_combat = verbose;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance constants for the combat loop.
///
/// Defaults reproduce the reference balance. They have no documented
/// rationale, so they are exposed for tuning rather than derived.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatTables {
    /// Attack crit: `base + luck * per_luck + critical_chance * per_crit_stat`.
    pub crit_base: f64,
    pub crit_per_luck: f64,
    pub crit_per_crit_stat: f64,
    /// Skill crit: `base + luck * per_luck`.
    pub skill_crit_base: f64,
    pub skill_crit_per_luck: f64,
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f64,

    /// Stamina per attack by hand configuration.
    pub stamina_cost_main_hand: f64,
    pub stamina_cost_off_hand: f64,
    pub stamina_cost_unarmed: f64,
    /// Damage multiplier when the attacker cannot pay the stamina cost.
    pub exhausted_multiplier: f64,

    /// Escape: `base + luck * per_luck`.
    pub flee_base: f64,
    pub flee_per_luck: f64,

    /// Dodge: `luck * per_luck + agility * per_agility`.
    pub dodge_per_luck: f64,
    pub dodge_per_agility: f64,

    /// Enemy hit: `attack * scale / (scale + defense + armor)`.
    pub mitigation_scale: f64,

    /// Normal drop: `base + luck * per_luck`.
    pub drop_base: f64,
    pub drop_per_luck: f64,
    /// Rarity boost used for guaranteed boss drops.
    pub boss_rarity_boost: f64,

    /// Weapon mastery xp granted per landed weapon attack.
    pub mastery_xp_per_hit: f64,
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            crit_base: 0.025,
            crit_per_luck: 0.01,
            crit_per_crit_stat: 0.02,
            skill_crit_base: 0.05,
            skill_crit_per_luck: 0.01,
            crit_multiplier: 2.0,

            stamina_cost_main_hand: 5.0,
            stamina_cost_off_hand: 10.0,
            stamina_cost_unarmed: 2.0,
            exhausted_multiplier: 0.5,

            flee_base: 0.3,
            flee_per_luck: 0.03,

            dodge_per_luck: 0.01,
            dodge_per_agility: 0.02,

            mitigation_scale: 100.0,

            drop_base: 0.2,
            drop_per_luck: 0.02,
            boss_rarity_boost: 1.5,

            mastery_xp_per_hit: 5.0,
        }
    }
}
