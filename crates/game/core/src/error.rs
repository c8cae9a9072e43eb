//! Common error infrastructure for tactics-core.
//!
//! Domain errors (`BoardError`, `ActionError`, `TurnError`, ...) live next to
//! the code that raises them. This module only provides the shared
//! classification so that callers can decide how to react without matching
//! on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request was legal in shape but not right now (tile taken, unit spent)
/// - **Validation**: the request can never succeed as written (off-board, friendly target)
/// - **Internal**: the state disagrees with itself and should be investigated
/// - **Fatal**: the battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
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

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Give each variant a stable `error_code` for logs and tests
pub trait GameError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
