//! State management errors.
//!
//! Errors related to board occupancy, roster management and snapshot decoding.

use crate::error::{ErrorSeverity, GameError};
use crate::hex::HexCoord;
use crate::state::UnitId;

/// Errors raised by the board index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Another unit already stands on the tile.
    #[error("tile {coord} is already occupied by unit {occupant}")]
    Occupied { coord: HexCoord, occupant: UnitId },

    /// The coordinate is not one of the board's tiles.
    #[error("tile {coord} is not on the board")]
    OffBoard { coord: HexCoord },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Occupied { .. } => ErrorSeverity::Recoverable,
            Self::OffBoard { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Occupied { .. } => "BOARD_OCCUPIED",
            Self::OffBoard { .. } => "BOARD_OFF_BOARD",
        }
    }
}

/// Errors raised while adding units to the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("unit id overflow (current: {current})")]
    UnitIdOverflow { current: u32 },

    #[error("unit id {0} is already in the roster")]
    DuplicateUnit(UnitId),

    #[error("unit {unit} cannot be placed: {source}")]
    Placement {
        unit: UnitId,
        #[source]
        source: BoardError,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnitIdOverflow { .. } => ErrorSeverity::Fatal,
            Self::DuplicateUnit(_) => ErrorSeverity::Validation,
            Self::Placement { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnitIdOverflow { .. } => "STATE_UNIT_ID_OVERFLOW",
            Self::DuplicateUnit(_) => "STATE_DUPLICATE_UNIT",
            Self::Placement { .. } => "STATE_PLACEMENT",
        }
    }
}

/// Errors raised when rebuilding a [`GameState`](crate::state::GameState)
/// from a [`GameSnapshot`](crate::state::GameSnapshot).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("unit id {0} appears more than once")]
    DuplicateUnit(UnitId),

    #[error("unit {unit} is recorded with zero health")]
    DefeatedUnit { unit: UnitId },

    #[error("unit {unit} health {health} exceeds its maximum {max}")]
    HealthOutOfRange { unit: UnitId, health: u32, max: u32 },

    #[error("unit {unit} energy {energy} exceeds its maximum {max}")]
    EnergyOutOfRange { unit: UnitId, energy: u32, max: u32 },

    #[error("unit {unit} cannot be placed: {source}")]
    Placement {
        unit: UnitId,
        #[source]
        source: BoardError,
    },

    #[error(transparent)]
    Roster(StateError),
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateUnit(_) => "SNAPSHOT_DUPLICATE_UNIT",
            Self::DefeatedUnit { .. } => "SNAPSHOT_DEFEATED_UNIT",
            Self::HealthOutOfRange { .. } => "SNAPSHOT_HEALTH_OUT_OF_RANGE",
            Self::EnergyOutOfRange { .. } => "SNAPSHOT_ENERGY_OUT_OF_RANGE",
            Self::Placement { .. } => "SNAPSHOT_PLACEMENT",
            Self::Roster(inner) => inner.error_code(),
        }
    }
}
