//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, the turn state machine, snapshots and
//! repositories so clients can bubble them up with consistent context.

use tactics_core::{ExecuteError, Side, SnapshotError, TurnError, TurnPhase};
use thiserror::Error;

use crate::repository::SaveSlot;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("failed to restore game state from snapshot")]
    Snapshot(#[source] SnapshotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("no save found in slot {0}")]
    MissingSave(SaveSlot),

    #[error("side {side} cannot act during {phase}")]
    NotSidesTurn { side: Side, phase: TurnPhase },
}

impl From<SnapshotError> for RuntimeError {
    fn from(error: SnapshotError) -> Self {
        Self::Snapshot(error)
    }
}
