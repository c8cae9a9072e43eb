use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, Side, TurnPhase};

use super::GameEngine;

/// Errors that can occur during turn transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the battle is over ({phase})")]
    GameOver { phase: TurnPhase },

    #[error("the battle has already started ({phase})")]
    AlreadyStarted { phase: TurnPhase },

    #[error("no side turn is in progress ({phase})")]
    NoActiveTurn { phase: TurnPhase },

    #[error("side {0} does not take turns")]
    NotCombatant(Side),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::GameOver { .. } | Self::AlreadyStarted { .. } | Self::NoActiveTurn { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::NotCombatant(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver { .. } => "TURN_GAME_OVER",
            Self::AlreadyStarted { .. } => "TURN_ALREADY_STARTED",
            Self::NoActiveTurn { .. } => "TURN_NO_ACTIVE_TURN",
            Self::NotCombatant(_) => "TURN_NOT_COMBATANT",
        }
    }
}

/// Outcome of the battle given who is still standing, if it is decided.
///
/// SideB eliminated → `Victory`, SideA eliminated → `Defeat`, both → `Draw`.
pub fn battle_result(state: &GameState) -> Option<TurnPhase> {
    let side_a = state.living_count(Side::SideA);
    let side_b = state.living_count(Side::SideB);
    match (side_a, side_b) {
        (0, 0) => Some(TurnPhase::Draw),
        (_, 0) => Some(TurnPhase::Victory),
        (0, _) => Some(TurnPhase::Defeat),
        _ => None,
    }
}

/// Turn state machine methods for GameEngine.
///
/// ```text
/// Setup ─▶ SideATurn ⇄ SideBTurn
///              │           │
///              └─▶ Victory / Defeat / Draw (terminal)
/// ```
impl<'a> GameEngine<'a> {
    pub fn phase(&self) -> TurnPhase {
        self.state.turn.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn.turn_number
    }

    /// Leaves `Setup`: turn 1 begins with SideA.
    pub fn start_first_turn(&mut self) -> Result<usize, TurnError> {
        let phase = self.phase();
        if phase != TurnPhase::Setup {
            return Err(TurnError::AlreadyStarted { phase });
        }
        self.state.turn.turn_number = 1;
        self.start_side_turn(Side::SideA)
    }

    /// Hands the turn to `side` and refreshes its living units.
    ///
    /// Returns how many units were refreshed. Rejected once the battle is over.
    pub fn start_side_turn(&mut self, side: Side) -> Result<usize, TurnError> {
        let phase = self.phase();
        if phase.is_terminal() {
            return Err(TurnError::GameOver { phase });
        }
        let next = TurnPhase::turn_of(side).ok_or(TurnError::NotCombatant(side))?;

        let mut refreshed = 0;
        for unit in self.state.units_mut().filter(|unit| unit.side() == side) {
            unit.reset_turn_flags();
            refreshed += 1;
        }
        self.state.turn.phase = next;
        Ok(refreshed)
    }

    /// Ends the current side's turn.
    ///
    /// The turn number advances when SideB's turn ends. If the battle is
    /// decided the terminal phase is entered, otherwise the opposing side's
    /// turn starts. Returns the resulting phase.
    pub fn end_side_turn(&mut self) -> Result<TurnPhase, TurnError> {
        let phase = self.phase();
        let side = match phase.active_side() {
            Some(side) => side,
            None if phase.is_terminal() => return Err(TurnError::GameOver { phase }),
            None => return Err(TurnError::NoActiveTurn { phase }),
        };

        if side == Side::SideB {
            self.state.turn.turn_number += 1;
        }

        if let Some(result) = self.check_end_conditions() {
            return Ok(result);
        }

        let next = side.opponent().ok_or(TurnError::NotCombatant(side))?;
        self.start_side_turn(next)?;
        Ok(self.phase())
    }

    /// Enters the terminal phase if one side has been wiped out.
    ///
    /// Returns the terminal phase when the battle is (or already was) over.
    pub fn check_end_conditions(&mut self) -> Option<TurnPhase> {
        let phase = self.phase();
        if phase.is_terminal() {
            return Some(phase);
        }
        let result = battle_result(self.state)?;
        self.state.turn.phase = result;
        Some(result)
    }
}
