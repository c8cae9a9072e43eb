//! Flat, persistence-friendly view of a [`GameState`].
//!
//! A snapshot holds everything needed to rebuild the roster, the board index
//! and the turn bookkeeping exactly. Decoding validates the records instead of
//! trusting them.

use std::collections::BTreeSet;

use crate::hex::HexCoord;

use super::{
    Board, BoardDimensions, GameState, Side, SnapshotError, StateError, TurnFlags, TurnPhase,
    TurnState, Unit, UnitId, UnitStats,
};

/// Global battle data plus one record per living unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub turn_number: u32,
    pub phase: TurnPhase,
    pub board: BoardDimensions,
    pub units: Vec<UnitRecord>,
}

/// Persisted form of one unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRecord {
    pub id: UnitId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub side: Side,
    pub position: HexCoord,
    pub health: u32,
    pub energy: u32,
    pub stats: UnitStats,
    pub has_moved: bool,
    pub has_attacked: bool,
}

impl From<&Unit> for UnitRecord {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id(),
            name: unit.name().to_owned(),
            description: unit.description().to_owned(),
            side: unit.side(),
            position: unit.position(),
            health: unit.health(),
            energy: unit.energy(),
            stats: *unit.stats(),
            has_moved: unit.has_moved(),
            has_attacked: unit.has_attacked(),
        }
    }
}

impl UnitRecord {
    fn flags(&self) -> TurnFlags {
        let mut flags = TurnFlags::empty();
        flags.set(TurnFlags::MOVED, self.has_moved);
        flags.set(TurnFlags::ATTACKED, self.has_attacked);
        flags
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.health == 0 {
            return Err(SnapshotError::DefeatedUnit { unit: self.id });
        }
        if self.health > self.stats.max_health {
            return Err(SnapshotError::HealthOutOfRange {
                unit: self.id,
                health: self.health,
                max: self.stats.max_health,
            });
        }
        if self.energy > self.stats.max_energy {
            return Err(SnapshotError::EnergyOutOfRange {
                unit: self.id,
                energy: self.energy,
                max: self.stats.max_energy,
            });
        }
        Ok(())
    }

    fn into_unit(self) -> Unit {
        let flags = self.flags();
        Unit::new(self.id, self.name, self.side, self.stats, self.position)
            .with_description(self.description)
            .with_health(self.health)
            .with_energy(self.energy)
            .with_flags(flags)
    }
}

impl GameState {
    /// Serializes the battle into its flat snapshot form.
    pub fn to_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            turn_number: self.turn.turn_number,
            phase: self.turn.phase,
            board: self.board().dimensions(),
            units: self.units().map(UnitRecord::from).collect(),
        }
    }

    /// Rebuilds a battle from a snapshot, validating every record.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, SnapshotError> {
        let mut state = GameState::new(Board::new(snapshot.board));
        state.turn = TurnState::new(snapshot.phase, snapshot.turn_number);

        let mut seen = BTreeSet::new();
        for record in &snapshot.units {
            if !seen.insert(record.id) {
                return Err(SnapshotError::DuplicateUnit(record.id));
            }
            record.validate()?;

            let id = record.id;
            state
                .insert_unit(record.clone().into_unit())
                .map_err(|err| match err {
                    StateError::Placement { source, .. } => {
                        SnapshotError::Placement { unit: id, source }
                    }
                    other => SnapshotError::Roster(other),
                })?;
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BoardError;

    fn battle() -> GameState {
        let mut state = GameState::default();
        state
            .spawn(
                "Scout",
                Side::SideA,
                UnitStats::new(100, 10, 5, 3, 1),
                HexCoord::new(-3, 0),
            )
            .unwrap();
        let sniper = state
            .spawn(
                "Enemy Sniper",
                Side::SideB,
                UnitStats::new(70, 18, 2, 2, 3),
                HexCoord::new(1, -3),
            )
            .unwrap();
        state.unit_mut(sniper).unwrap().take_damage(25);
        state.unit_mut(sniper).unwrap().mark_moved();
        state.turn = TurnState::new(TurnPhase::SideBTurn, 4);
        state
    }

    #[test]
    fn snapshot_rebuilds_identical_state() {
        let state = battle();
        let snapshot = state.to_snapshot();

        assert_eq!(snapshot.units.len(), 2);
        assert_eq!(snapshot.units[1].health, 45);
        assert!(snapshot.units[1].has_moved);

        let restored = GameState::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored, state);
        assert!(restored.is_consistent());
    }

    #[test]
    fn rejects_units_sharing_a_tile() {
        let mut snapshot = battle().to_snapshot();
        snapshot.units[1].position = snapshot.units[0].position;

        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(SnapshotError::Placement {
                source: BoardError::Occupied { .. },
                ..
            })
        ));
    }

    #[test]
    fn rejects_health_above_maximum_and_dead_records() {
        let mut snapshot = battle().to_snapshot();
        snapshot.units[0].health = 500;
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(SnapshotError::HealthOutOfRange { .. })
        ));

        snapshot.units[0].health = 0;
        assert_eq!(
            GameState::from_snapshot(&snapshot),
            Err(SnapshotError::DefeatedUnit { unit: UnitId(1) })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut snapshot = battle().to_snapshot();
        snapshot.units[1].id = snapshot.units[0].id;
        assert_eq!(
            GameState::from_snapshot(&snapshot),
            Err(SnapshotError::DuplicateUnit(UnitId(1)))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_form_uses_cube_triples() {
        let snapshot = battle().to_snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["units"][0]["position"], serde_json::json!([-3, 0, 3]));
        assert_eq!(json["phase"], "side_b_turn");

        let mut bad = json.clone();
        bad["units"][0]["position"] = serde_json::json!([1, 1, 1]);
        assert!(serde_json::from_value::<GameSnapshot>(bad).is_err());
    }
}
