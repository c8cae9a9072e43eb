use super::Side;

/// Battle-level state machine position.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TurnPhase {
    #[default]
    Setup,
    SideATurn,
    SideBTurn,
    /// SideB was eliminated.
    Victory,
    /// SideA was eliminated.
    Defeat,
    /// Both sides were eliminated at once.
    Draw,
}

impl TurnPhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat | Self::Draw)
    }

    /// The side whose turn it is, if any.
    pub const fn active_side(self) -> Option<Side> {
        match self {
            Self::SideATurn => Some(Side::SideA),
            Self::SideBTurn => Some(Side::SideB),
            _ => None,
        }
    }

    /// The turn phase belonging to `side`.
    pub const fn turn_of(side: Side) -> Option<Self> {
        match side {
            Side::SideA => Some(Self::SideATurn),
            Side::SideB => Some(Self::SideBTurn),
            Side::Neutral => None,
        }
    }
}

/// Turn bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Starts at 1 with the first side turn; advances when SideB's turn ends.
    pub turn_number: u32,
}

impl TurnState {
    pub fn new(phase: TurnPhase, turn_number: u32) -> Self {
        Self { phase, turn_number }
    }
}
