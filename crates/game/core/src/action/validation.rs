//! Move and attack eligibility.
//!
//! Movement reach is `range(position, movement_range)` filtered to free board
//! tiles. Terrain cost and path blocking are not considered.

use crate::hex::HexCoord;
use crate::state::{GameState, Unit};

use super::ActionError;

/// Checks whether `unit` may move to `destination` this turn.
pub fn check_move(state: &GameState, unit: &Unit, destination: HexCoord) -> Result<(), ActionError> {
    if unit.has_moved() {
        return Err(ActionError::AlreadyMoved { unit: unit.id() });
    }
    let board = state.board();
    if !board.contains(destination) {
        return Err(ActionError::OffBoard { destination });
    }
    if let Some(occupant) = board.tile_at(destination) {
        return Err(ActionError::DestinationOccupied {
            destination,
            occupant,
        });
    }

    let distance = unit.position().distance(destination);
    let range = unit.stats().movement_range;
    if distance > range {
        return Err(ActionError::OutOfMoveRange {
            destination,
            distance,
            range,
        });
    }
    Ok(())
}

/// Checks whether `attacker` may attack `target` from its current position.
pub fn check_attack(attacker: &Unit, target: &Unit) -> Result<(), ActionError> {
    check_attack_from(attacker, attacker.position(), target)
}

/// Checks whether `attacker` could attack `target` if it stood on `from`.
///
/// Used both after a simulated move and for the move-then-attack action.
pub fn check_attack_from(attacker: &Unit, from: HexCoord, target: &Unit) -> Result<(), ActionError> {
    if attacker.has_attacked() {
        return Err(ActionError::AlreadyAttacked {
            unit: attacker.id(),
        });
    }
    if attacker.side() == target.side() {
        return Err(ActionError::FriendlyTarget {
            unit: attacker.id(),
            target: target.id(),
        });
    }

    let distance = from.distance(target.position());
    let range = attacker.stats().attack_range;
    if distance > range {
        return Err(ActionError::OutOfAttackRange {
            target: target.id(),
            distance,
            range,
        });
    }
    Ok(())
}

pub fn can_move_to(state: &GameState, unit: &Unit, destination: HexCoord) -> bool {
    check_move(state, unit, destination).is_ok()
}

pub fn can_attack(attacker: &Unit, target: &Unit) -> bool {
    check_attack(attacker, target).is_ok()
}

/// Free board tiles `unit` can move to this turn, in `HexCoord::range` order.
///
/// Empty once the unit has moved.
pub fn reachable_tiles(state: &GameState, unit: &Unit) -> Vec<HexCoord> {
    if unit.has_moved() {
        return Vec::new();
    }
    let board = state.board();
    unit.position()
        .range(unit.stats().movement_range)
        .into_iter()
        .filter(|tile| board.is_free(*tile))
        .collect()
}
