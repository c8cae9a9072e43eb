use serde::{Deserialize, Serialize};
use tactics_core::{CombatOutcome, HexCoord, Side, TurnPhase, UnitId};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn hand-over and battle end
    Turn,
    /// Unit movement and deaths
    Unit,
    /// Attack resolutions
    Combat,
}

/// Something the presentation layer may want to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    SideTurnStarted {
        side: Side,
        turn_number: u32,
    },
    UnitMoved {
        unit: UnitId,
        from: HexCoord,
        to: HexCoord,
    },
    UnitAttacked {
        outcome: CombatOutcome,
    },
    UnitDied {
        unit: UnitId,
        side: Side,
        position: HexCoord,
    },
    BattleEnded {
        result: TurnPhase,
        turn_number: u32,
    },
}

impl GameEvent {
    /// Stable event name used by presentation layers.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::SideTurnStarted { .. } => "side-turn-started",
            GameEvent::UnitMoved { .. } => "unit-moved",
            GameEvent::UnitAttacked { .. } => "unit-attacked",
            GameEvent::UnitDied { .. } => "unit-died",
            GameEvent::BattleEnded { .. } => "battle-ended",
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            GameEvent::SideTurnStarted { .. } | GameEvent::BattleEnded { .. } => Topic::Turn,
            GameEvent::UnitMoved { .. } | GameEvent::UnitDied { .. } => Topic::Unit,
            GameEvent::UnitAttacked { .. } => Topic::Combat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_their_names() {
        let event = GameEvent::SideTurnStarted {
            side: Side::SideB,
            turn_number: 3,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], event.name());
        assert_eq!(json["side"], "side_b");
        assert_eq!(event.topic(), Topic::Turn);
    }
}
