//! Status effect kinds and their per-instance state.

/// Broad classification used for presentation and for cleanse-style logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectCategory {
    Buff,
    Debuff,
    Control,
}

/// Damage families an entity can resist.
///
/// Positive resistance lowers the chance an effect takes hold; negative
/// resistance is a vulnerability.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResistanceKind {
    Poison,
    Burn,
    Freeze,
}

/// Every effect the game knows, with the data each one carries.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum EffectKind {
    Poison { damage_per_turn: f64 },
    Burn { damage_per_turn: f64 },
    Freeze,
    FireResistance,
    AttackBoost { amount: f64 },
    DefenseBoost { amount: f64 },
    LuckBoost { amount: f64 },
    /// Instant heal; never stays in the active list.
    Healing { amount: f64 },
}

impl EffectKind {
    /// Display name. Two effects with the same name refresh instead of stacking.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Poison { .. } => "Poison",
            Self::Burn { .. } => "Burn",
            Self::Freeze => "Freeze",
            Self::FireResistance => "Fire Resistance",
            Self::AttackBoost { .. } => "Attack Boost",
            Self::DefenseBoost { .. } => "Defense Boost",
            Self::LuckBoost { .. } => "Luck Boost",
            Self::Healing { .. } => "Healing",
        }
    }

    pub const fn category(&self) -> EffectCategory {
        match self {
            Self::Poison { .. } | Self::Burn { .. } => EffectCategory::Debuff,
            Self::Freeze => EffectCategory::Control,
            Self::FireResistance
            | Self::AttackBoost { .. }
            | Self::DefenseBoost { .. }
            | Self::LuckBoost { .. }
            | Self::Healing { .. } => EffectCategory::Buff,
        }
    }

    /// Damage dealt at each turn start, bypassing temporary hp.
    pub const fn damage_per_turn(&self) -> f64 {
        match self {
            Self::Poison { damage_per_turn } | Self::Burn { damage_per_turn } => *damage_per_turn,
            _ => 0.0,
        }
    }

    /// Resistance consulted when this effect is applied, if any.
    pub const fn resistance(&self) -> Option<ResistanceKind> {
        match self {
            Self::Poison { .. } => Some(ResistanceKind::Poison),
            Self::Burn { .. } => Some(ResistanceKind::Burn),
            Self::Freeze => Some(ResistanceKind::Freeze),
            _ => None,
        }
    }

    /// Default duration in turns for this kind.
    pub const fn default_duration(&self) -> i32 {
        match self {
            Self::Poison { .. } | Self::AttackBoost { .. } | Self::DefenseBoost { .. } => 3,
            Self::LuckBoost { .. } => 3,
            Self::Burn { .. } | Self::FireResistance => 2,
            Self::Freeze => 1,
            Self::Healing { .. } => 0,
        }
    }
}

/// An effect instance with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: EffectKind,
    /// Remaining turns; the effect expires once this reaches zero.
    pub duration: i32,
}

impl StatusEffect {
    pub const fn new(kind: EffectKind, duration: i32) -> Self {
        Self { kind, duration }
    }

    /// Effect with its kind's default duration.
    pub const fn with_default_duration(kind: EffectKind) -> Self {
        Self::new(kind, kind.default_duration())
    }

    pub const fn poison() -> Self {
        Self::new(EffectKind::Poison { damage_per_turn: 5.0 }, 3)
    }

    pub const fn burn() -> Self {
        Self::new(EffectKind::Burn { damage_per_turn: 8.0 }, 2)
    }

    pub const fn freeze() -> Self {
        Self::new(EffectKind::Freeze, 1)
    }

    pub const fn fire_resistance() -> Self {
        Self::new(EffectKind::FireResistance, 2)
    }

    pub const fn attack_boost() -> Self {
        Self::new(EffectKind::AttackBoost { amount: 5.0 }, 3)
    }

    pub const fn defense_boost() -> Self {
        Self::new(EffectKind::DefenseBoost { amount: 5.0 }, 3)
    }

    pub const fn luck_boost() -> Self {
        Self::new(EffectKind::LuckBoost { amount: 3.0 }, 3)
    }

    pub const fn healing(amount: f64) -> Self {
        Self::new(EffectKind::Healing { amount }, 0)
    }

    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub const fn is_expired(&self) -> bool {
        self.duration <= 0
    }
}

impl core::fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({} turns left)", self.name(), self.duration)
    }
}
