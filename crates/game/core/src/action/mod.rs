//! Unit actions and their eligibility rules.
//!
//! - `Action`: what a unit does on its turn (chosen by a player or the AI)
//! - `validation`: move/attack eligibility shared by the engine and the AI
//! - `error`: why an action was rejected

pub mod error;
pub mod validation;

pub use error::ActionError;
pub use validation::{
    can_attack, can_move_to, check_attack, check_attack_from, check_move, reachable_tiles,
};

use std::fmt;

use crate::hex::HexCoord;
use crate::state::UnitId;

/// A single unit's decision for its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    /// Attack from the current position.
    Attack { target: UnitId },
    /// Move without attacking.
    Move { destination: HexCoord },
    /// Move, then attack from the destination.
    MoveAndAttack { destination: HexCoord, target: UnitId },
    /// Do nothing.
    Wait,
}

impl Action {
    pub fn destination(&self) -> Option<HexCoord> {
        match self {
            Self::Move { destination } | Self::MoveAndAttack { destination, .. } => {
                Some(*destination)
            }
            Self::Attack { .. } | Self::Wait => None,
        }
    }

    pub fn target(&self) -> Option<UnitId> {
        match self {
            Self::Attack { target } | Self::MoveAndAttack { target, .. } => Some(*target),
            Self::Move { .. } | Self::Wait => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Move { .. } => "move",
            Self::MoveAndAttack { .. } => "move_and_attack",
            Self::Wait => "wait",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attack { target } => write!(f, "attack {target}"),
            Self::Move { destination } => write!(f, "move to {destination}"),
            Self::MoveAndAttack {
                destination,
                target,
            } => write!(f, "move to {destination} and attack {target}"),
            Self::Wait => f.write_str("wait"),
        }
    }
}
