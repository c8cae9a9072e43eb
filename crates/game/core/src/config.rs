//! Game configuration constants and tunable parameters.

use crate::state::BoardDimensions;

/// Battle-wide configuration: board layout and AI tuning.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub board: BoardDimensions,
    pub ai: AiProfile,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Lower bound on damage for any attack or counter that lands.
    pub const MIN_DAMAGE: u32 = 1;
    /// Upper bound (exclusive) of a percentage roll.
    pub const PERCENT_ROLL: u32 = 100;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board(mut self, board: BoardDimensions) -> Self {
        self.board = board;
        self
    }

    pub fn with_ai(mut self, ai: AiProfile) -> Self {
        self.ai = ai;
        self
    }
}

/// Weights used by the AI when scoring attacks and approach moves.
///
/// Scores are unitless; only their relative order matters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiProfile {
    /// Attack scores are scaled by `0.5 + aggressiveness`.
    pub aggressiveness: f32,
    /// Added when the estimated damage would finish the target.
    pub kill_bonus: f32,
    /// Multiplied by the target's missing health fraction.
    pub weakness_weight: f32,
    /// Attackers with defense below this pay the exposure penalty.
    pub tank_defense_threshold: u32,
    /// Radius used to count enemies around the attacker.
    pub exposure_radius: u32,
    /// Subtracted per enemy counted within `exposure_radius`.
    pub exposure_penalty: f32,
    /// Multiplied by the target's missing health fraction when only approaching.
    pub approach_weakness_weight: f32,
}

impl AiProfile {
    pub const DEFAULT_AGGRESSIVENESS: f32 = 0.6;

    pub fn with_aggressiveness(mut self, aggressiveness: f32) -> Self {
        self.aggressiveness = aggressiveness;
        self
    }
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            aggressiveness: Self::DEFAULT_AGGRESSIVENESS,
            kill_bonus: 100.0,
            weakness_weight: 20.0,
            tank_defense_threshold: 7,
            exposure_radius: 2,
            exposure_penalty: 5.0,
            approach_weakness_weight: 10.0,
        }
    }
}
