//! Action validation errors.

use crate::error::{ErrorSeverity, GameError};
use crate::hex::HexCoord;
use crate::state::{TurnPhase, UnitId};

/// Reasons a move or attack was refused.
///
/// Nothing is mutated when one of these is returned; the caller simply does
/// not perform the action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("unit {unit} cannot act during {phase}")]
    NotUnitsTurn { unit: UnitId, phase: TurnPhase },

    #[error("unit {unit} has already moved this turn")]
    AlreadyMoved { unit: UnitId },

    #[error("unit {unit} has already attacked this turn")]
    AlreadyAttacked { unit: UnitId },

    #[error("destination {destination} is not on the board")]
    OffBoard { destination: HexCoord },

    #[error("destination {destination} is occupied by unit {occupant}")]
    DestinationOccupied {
        destination: HexCoord,
        occupant: UnitId,
    },

    #[error("destination {destination} is {distance} tiles away (movement range {range})")]
    OutOfMoveRange {
        destination: HexCoord,
        distance: u32,
        range: u32,
    },

    #[error("unit {unit} cannot attack friendly unit {target}")]
    FriendlyTarget { unit: UnitId, target: UnitId },

    #[error("target {target} is {distance} tiles away (attack range {range})")]
    OutOfAttackRange {
        target: UnitId,
        distance: u32,
        range: u32,
    },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            // The same request may succeed later in the battle
            NotUnitsTurn { .. }
            | AlreadyMoved { .. }
            | AlreadyAttacked { .. }
            | DestinationOccupied { .. }
            | OutOfMoveRange { .. }
            | OutOfAttackRange { .. } => ErrorSeverity::Recoverable,

            UnitNotFound(_) | OffBoard { .. } | FriendlyTarget { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnitNotFound(_) => "ACTION_UNIT_NOT_FOUND",
            NotUnitsTurn { .. } => "ACTION_NOT_UNITS_TURN",
            AlreadyMoved { .. } => "ACTION_ALREADY_MOVED",
            AlreadyAttacked { .. } => "ACTION_ALREADY_ATTACKED",
            OffBoard { .. } => "ACTION_OFF_BOARD",
            DestinationOccupied { .. } => "ACTION_DESTINATION_OCCUPIED",
            OutOfMoveRange { .. } => "ACTION_OUT_OF_MOVE_RANGE",
            FriendlyTarget { .. } => "ACTION_FRIENDLY_TARGET",
            OutOfAttackRange { .. } => "ACTION_OUT_OF_ATTACK_RANGE",
        }
    }
}
