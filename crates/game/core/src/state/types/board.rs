use std::collections::{BTreeMap, BTreeSet};

use arrayvec::ArrayVec;

use crate::hex::HexCoord;
use crate::state::BoardError;

use super::UnitId;

/// Width and height used to lay out a hex board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardDimensions {
    pub width: u32,
    pub height: u32,
}

impl BoardDimensions {
    pub const DEFAULT_WIDTH: u32 = 10;
    pub const DEFAULT_HEIGHT: u32 = 10;

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Tiles of a roughly rectangular board centred on the origin.
    ///
    /// Rows run `r ∈ [-h/2, h/2]`; each row spans
    /// `q ∈ [-w/2 - min(0, r), w/2 - max(0, r)]` (integer halves).
    pub fn layout(self) -> Vec<HexCoord> {
        let half_w = (self.width / 2) as i32;
        let half_h = (self.height / 2) as i32;

        let mut tiles = Vec::new();
        for r in -half_h..=half_h {
            let q_start = -half_w - r.min(0);
            let q_end = half_w - r.max(0);
            for q in q_start..=q_end {
                tiles.push(HexCoord::new(q, r));
            }
        }
        tiles
    }
}

impl Default for BoardDimensions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, Self::DEFAULT_HEIGHT)
    }
}

/// Board index: the set of tiles plus a bidirectional unit/tile mapping.
///
/// Invariant: `occupancy[c] == u` if and only if `positions[u] == c`. Every
/// mutation updates both maps together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    dimensions: BoardDimensions,
    tiles: BTreeSet<HexCoord>,
    occupancy: BTreeMap<HexCoord, UnitId>,
    positions: BTreeMap<UnitId, HexCoord>,
}

impl Board {
    pub fn new(dimensions: BoardDimensions) -> Self {
        Self {
            dimensions,
            tiles: dimensions.layout().into_iter().collect(),
            occupancy: BTreeMap::new(),
            positions: BTreeMap::new(),
        }
    }

    pub fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Whether `coord` is a tile of this board.
    pub fn contains(&self, coord: HexCoord) -> bool {
        self.tiles.contains(&coord)
    }

    pub fn tiles(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.tiles.iter().copied()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// The unit standing on `coord`, if any.
    pub fn tile_at(&self, coord: HexCoord) -> Option<UnitId> {
        self.occupancy.get(&coord).copied()
    }

    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.occupancy.contains_key(&coord)
    }

    /// On the board and nobody standing there.
    pub fn is_free(&self, coord: HexCoord) -> bool {
        self.contains(coord) && !self.is_occupied(coord)
    }

    pub fn position_of(&self, unit: UnitId) -> Option<HexCoord> {
        self.positions.get(&unit).copied()
    }

    pub fn occupants(&self) -> impl Iterator<Item = (HexCoord, UnitId)> + '_ {
        self.occupancy.iter().map(|(coord, unit)| (*coord, *unit))
    }

    /// Places `unit` on `coord`, vacating its previous tile in the same step.
    ///
    /// Returns the previous coordinate, if the unit was already on the board.
    /// Re-placing a unit on its own tile is a no-op.
    pub fn place(&mut self, unit: UnitId, coord: HexCoord) -> Result<Option<HexCoord>, BoardError> {
        if !self.contains(coord) {
            return Err(BoardError::OffBoard { coord });
        }
        if let Some(occupant) = self.tile_at(coord) {
            if occupant != unit {
                return Err(BoardError::Occupied { coord, occupant });
            }
        }

        let previous = self.positions.insert(unit, coord);
        if let Some(old) = previous {
            self.occupancy.remove(&old);
        }
        self.occupancy.insert(coord, unit);
        Ok(previous)
    }

    /// Clears the unit's mapping. Returns the tile it stood on.
    pub fn remove(&mut self, unit: UnitId) -> Option<HexCoord> {
        let coord = self.positions.remove(&unit)?;
        self.occupancy.remove(&coord);
        Some(coord)
    }

    /// Adjacent coordinates that are tiles of this board, in direction order.
    pub fn neighbors_on_board(&self, coord: HexCoord) -> ArrayVec<HexCoord, 6> {
        coord
            .neighbors()
            .into_iter()
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    /// Checks that the two occupancy maps mirror each other.
    pub fn is_consistent(&self) -> bool {
        self.occupancy.len() == self.positions.len()
            && self
                .positions
                .iter()
                .all(|(unit, coord)| self.occupancy.get(coord) == Some(unit))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardDimensions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_contains_starting_tiles() {
        let board = Board::default();
        for (q, r) in [(-3, 0), (-2, -1), (-1, -2), (3, -3), (2, -3), (1, -3)] {
            assert!(board.contains(HexCoord::new(q, r)), "missing ({q}, {r})");
        }
        assert!(!board.contains(HexCoord::new(6, 0)));
        assert!(!board.contains(HexCoord::new(0, 6)));
    }

    #[test]
    fn layout_rows_shrink_away_from_center() {
        let tiles = BoardDimensions::new(4, 2).layout();
        // r = -1: q in [-1, 2]; r = 0: q in [-2, 2]; r = 1: q in [-2, 1]
        assert_eq!(tiles.len(), 4 + 5 + 4);
        assert_eq!(tiles.first(), Some(&HexCoord::new(-1, -1)));
        assert_eq!(tiles.last(), Some(&HexCoord::new(1, 1)));
    }

    #[test]
    fn place_moves_unit_and_vacates_previous_tile() {
        let mut board = Board::default();
        let unit = UnitId(1);
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(1, 0);

        assert_eq!(board.place(unit, a), Ok(None));
        assert_eq!(board.place(unit, b), Ok(Some(a)));
        assert!(!board.is_occupied(a));
        assert_eq!(board.tile_at(b), Some(unit));
        assert_eq!(board.position_of(unit), Some(b));
        assert!(board.is_consistent());
    }

    #[test]
    fn place_rejects_occupied_and_off_board_tiles() {
        let mut board = Board::default();
        let coord = HexCoord::new(0, 0);
        board.place(UnitId(1), coord).unwrap();

        assert_eq!(
            board.place(UnitId(2), coord),
            Err(BoardError::Occupied {
                coord,
                occupant: UnitId(1)
            })
        );
        let far = HexCoord::new(40, 0);
        assert_eq!(
            board.place(UnitId(2), far),
            Err(BoardError::OffBoard { coord: far })
        );
        assert_eq!(board.place(UnitId(1), coord), Ok(Some(coord)));
        assert!(board.is_consistent());
    }

    #[test]
    fn invariant_survives_mixed_operations() {
        let mut board = Board::default();
        let coords: Vec<HexCoord> = board.tiles().take(12).collect();

        for (step, coord) in coords.iter().enumerate() {
            let unit = UnitId((step % 4) as u32 + 1);
            let _ = board.place(unit, *coord);
            if step % 5 == 4 {
                board.remove(unit);
            }
            assert!(board.is_consistent());
        }

        assert_eq!(board.remove(UnitId(99)), None);
    }

    #[test]
    fn neighbors_on_board_drop_edge_tiles() {
        let board = Board::new(BoardDimensions::new(2, 2));
        let corner = HexCoord::new(1, 0);
        let neighbors = board.neighbors_on_board(corner);
        assert!(neighbors.len() < 6);
        assert!(neighbors.iter().all(|n| board.contains(*n)));
        assert_eq!(board.neighbors_on_board(HexCoord::ORIGIN).len(), 6);
    }
}
