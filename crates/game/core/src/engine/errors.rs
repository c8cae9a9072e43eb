//! Error types for the action execution pipeline.

use crate::action::ActionError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::BoardError;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    /// The action was refused before anything changed.
    #[error("{phase} rejected: {error}")]
    Rejected {
        phase: TransitionPhase,
        #[source]
        error: ActionError,
    },

    /// The board refused a placement that validation had accepted.
    #[error("apply failed: {0}")]
    Board(#[from] BoardError),

    /// Unit positions and the board index disagree after applying an action.
    #[error("post_validate failed: board index out of sync with unit positions")]
    Desync,
}

impl ExecuteError {
    pub(crate) fn rejected(error: ActionError) -> Self {
        Self::Rejected {
            phase: TransitionPhase::PreValidate,
            error,
        }
    }

    /// The underlying action error, for refusals.
    pub fn action_error(&self) -> Option<&ActionError> {
        match self {
            Self::Rejected { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected { error, .. } => error.severity(),
            Self::Board(_) | Self::Desync => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Rejected { error, .. } => error.error_code(),
            Self::Board(error) => error.error_code(),
            Self::Desync => "ENGINE_DESYNC",
        }
    }
}
