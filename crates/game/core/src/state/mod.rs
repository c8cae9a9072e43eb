//! Authoritative battle state.
//!
//! [`GameState`] owns the live unit roster, the board index and the turn
//! bookkeeping. Callers read it freely but mutate units only through
//! [`crate::engine::GameEngine`], which keeps unit positions and the board in
//! lockstep.
mod error;
pub mod snapshot;
pub mod types;

use std::collections::BTreeMap;

use crate::hex::HexCoord;

pub use error::{BoardError, SnapshotError, StateError};
pub use snapshot::{GameSnapshot, UnitRecord};
pub use types::{
    Board, BoardDimensions, Side, TurnFlags, TurnPhase, TurnState, Unit, UnitId, UnitPhase,
    UnitStats,
};

/// Canonical state of one battle.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    /// Sequential unit ID allocator (monotonically increasing, never reused).
    next_unit_id: UnitId,

    pub(crate) turn: TurnState,
    /// Living units only; the dead are dropped from the roster.
    units: BTreeMap<UnitId, Unit>,
    board: Board,
}

impl GameState {
    /// Creates an empty battle on `board`, in the `Setup` phase.
    pub fn new(board: Board) -> Self {
        Self {
            next_unit_id: UnitId::FIRST,
            turn: TurnState::default(),
            units: BTreeMap::new(),
            board,
        }
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn.turn_number
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// All living units in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.values()
    }

    /// Living units of `side` in id order.
    pub fn units_of(&self, side: Side) -> impl Iterator<Item = &Unit> + '_ {
        self.units.values().filter(move |unit| unit.side() == side)
    }

    pub fn living_count(&self, side: Side) -> usize {
        self.units_of(side).count()
    }

    /// The unit standing on `coord`, if any.
    pub fn unit_at(&self, coord: HexCoord) -> Option<&Unit> {
        self.board.tile_at(coord).and_then(|id| self.units.get(&id))
    }

    /// Adds a fresh unit to the roster and places it on the board.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        side: Side,
        stats: UnitStats,
        position: HexCoord,
    ) -> Result<UnitId, StateError> {
        let id = self.next_unit_id;
        self.insert_unit(Unit::new(id, name, side, stats, position))?;
        Ok(id)
    }

    /// Inserts a prepared unit under its own id, placing it on the board first.
    ///
    /// The id allocator skips past the inserted id.
    pub fn insert_unit(&mut self, unit: Unit) -> Result<(), StateError> {
        let id = unit.id();
        if self.units.contains_key(&id) {
            return Err(StateError::DuplicateUnit(id));
        }
        let next_unit_id = if id >= self.next_unit_id {
            id.next()
                .ok_or(StateError::UnitIdOverflow { current: id.0 })?
        } else {
            self.next_unit_id
        };

        self.board
            .place(id, unit.position())
            .map_err(|source| StateError::Placement { unit: id, source })?;

        self.next_unit_id = next_unit_id;
        self.units.insert(id, unit);
        Ok(())
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub(crate) fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> + '_ {
        self.units.values_mut()
    }

    /// Moves a unit on the board and updates its position together.
    pub(crate) fn relocate(&mut self, id: UnitId, destination: HexCoord) -> Result<(), BoardError> {
        self.board.place(id, destination)?;
        if let Some(unit) = self.units.get_mut(&id) {
            unit.set_position(destination);
        }
        Ok(())
    }

    /// Drops a unit from the roster and frees its tile.
    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        self.board.remove(id);
        self.units.remove(&id)
    }

    /// Board and roster agree on every unit's position.
    pub fn is_consistent(&self) -> bool {
        self.board.is_consistent()
            && self.units.len() == self.board.occupants().count()
            && self
                .units
                .values()
                .all(|unit| self.board.position_of(unit.id()) == Some(unit.position()))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_allocates_sequential_ids_and_places_units() {
        let mut state = GameState::default();
        let a = state
            .spawn("Scout", Side::SideA, UnitStats::default(), HexCoord::new(-3, 0))
            .unwrap();
        let b = state
            .spawn("Enemy Scout", Side::SideB, UnitStats::default(), HexCoord::new(3, -3))
            .unwrap();

        assert_eq!(a, UnitId(1));
        assert_eq!(b, UnitId(2));
        assert_eq!(state.unit_at(HexCoord::new(3, -3)).map(Unit::id), Some(b));
        assert_eq!(state.living_count(Side::SideA), 1);
        assert!(state.is_consistent());
    }

    #[test]
    fn spawn_on_occupied_tile_leaves_roster_unchanged() {
        let mut state = GameState::default();
        let coord = HexCoord::new(0, 0);
        state
            .spawn("Soldier", Side::SideA, UnitStats::default(), coord)
            .unwrap();

        let err = state
            .spawn("Intruder", Side::SideB, UnitStats::default(), coord)
            .unwrap_err();
        assert!(matches!(
            err,
            StateError::Placement {
                source: BoardError::Occupied { .. },
                ..
            }
        ));
        assert_eq!(state.units().count(), 1);
        assert!(state.is_consistent());
    }

    #[test]
    fn removal_frees_tile() {
        let mut state = GameState::default();
        let coord = HexCoord::new(1, 1);
        let id = state
            .spawn("Sniper", Side::SideB, UnitStats::default(), coord)
            .unwrap();

        assert!(state.remove_unit(id).is_some());
        assert!(!state.board().is_occupied(coord));
        assert!(state.unit(id).is_none());
        assert!(state.is_consistent());
    }
}
