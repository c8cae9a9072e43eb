//! Starting rosters.

use tactics_core::{
    Board, BoardDimensions, GameConfig, GameState, HexCoord, Side, StateError, Unit, UnitId, UnitStats,
};

/// One unit as placed at the start of a battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub side: Side,
    pub position: HexCoord,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: UnitStats,
}

impl UnitSpec {
    pub fn new(name: impl Into<String>, side: Side, stats: UnitStats, position: HexCoord) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            side,
            position,
            stats,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A board and the units on it before the first turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioSpec {
    pub name: String,
    /// Board size; when absent the configured default is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub board: Option<BoardDimensions>,
    pub units: Vec<UnitSpec>,
}

impl ScenarioSpec {
    /// Three against three on the default board.
    pub fn default_skirmish() -> Self {
        let unit = |name, side, stats, (q, r)| UnitSpec::new(name, side, stats, HexCoord::new(q, r));
        Self {
            name: "Skirmish".to_owned(),
            board: None,
            units: vec![
                unit("Scout", Side::SideA, UnitStats::new(100, 10, 5, 3, 1), (-3, 0))
                    .with_description("Fast unit with high mobility"),
                unit("Soldier", Side::SideA, UnitStats::new(120, 15, 8, 2, 1), (-2, -1))
                    .with_description("Balanced unit with good defense"),
                unit("Sniper", Side::SideA, UnitStats::new(80, 20, 3, 2, 3), (-1, -2))
                    .with_description("Long-range unit with high damage"),
                unit("Enemy Scout", Side::SideB, UnitStats::new(90, 8, 4, 3, 1), (3, -3)),
                unit("Enemy Soldier", Side::SideB, UnitStats::new(110, 12, 7, 2, 1), (2, -3)),
                unit("Enemy Sniper", Side::SideB, UnitStats::new(70, 18, 2, 2, 3), (1, -3)),
            ],
        }
    }

    /// Builds the initial state on the scenario's board or the default one.
    pub fn build(&self) -> Result<GameState, StateError> {
        self.build_with(&GameConfig::default())
    }

    /// Builds the initial state, falling back to `config.board`.
    ///
    /// Units get ids in listing order, starting at 1.
    pub fn build_with(&self, config: &GameConfig) -> Result<GameState, StateError> {
        let board = self.board.unwrap_or(config.board);
        let mut state = GameState::new(Board::new(board));
        let mut id = UnitId::FIRST;
        for spec in &self.units {
            let unit = Unit::new(id, spec.name.clone(), spec.side, spec.stats, spec.position)
                .with_description(spec.description.clone());
            state.insert_unit(unit)?;
            id = id
                .next()
                .ok_or(StateError::UnitIdOverflow { current: id.0 })?;
        }
        Ok(state)
    }
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self::default_skirmish()
    }
}
