//! Common error infrastructure for dungeon-core.
//!
//! Domain errors (`EquipError`, `SkillError`, ...) live next to the operations
//! that produce them. This module only provides the classification shared by
//! all of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: each operation family has its own error enum
//! - **No hard failures in combat**: data mismatches are logged, not raised
//! - **Severity Classification**: callers pick a recovery strategy from
//!   [`ErrorSeverity`] instead of matching every variant

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action can be retried or swapped for another one
/// - **Validation**: the input itself was wrong and must change before retry
/// - **Internal**: an invariant was broken; indicates a bug
/// - **Fatal**: state cannot be trusted any more
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: not enough mana, inventory full, both hands occupied.
    Recoverable,

    /// Examples: unknown armor type, skill index out of range.
    Validation,

    /// Examples: a slot rejected gear that the slot resolver picked for it.
    Internal,

    /// Unused inside the core; reserved for collaborators such as persistence.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all dungeon-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Give every variant a stable `error_code` for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_helpers() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
