//! Read-only decision context for one unit.

use tactics_core::action;
use tactics_core::{GameState, HexCoord, Unit};

/// Everything the AI may look at while deciding for one unit.
///
/// The context never mutates the state. "What if I stood there" questions
/// take the hypothetical tile as an argument instead of relocating the unit.
pub struct AiContext<'a> {
    /// The unit making the decision.
    pub unit: &'a Unit,

    /// Read-only access to the current game state.
    pub state: &'a GameState,

    enemies: Vec<&'a Unit>,
}

impl<'a> AiContext<'a> {
    /// Context with an explicit enemy roster.
    pub fn new(unit: &'a Unit, state: &'a GameState, enemies: Vec<&'a Unit>) -> Self {
        Self {
            unit,
            state,
            enemies,
        }
    }

    /// Context whose enemies are the living units of the opposing side.
    ///
    /// Neutral units have no opposing side and therefore no enemies.
    pub fn for_unit(unit: &'a Unit, state: &'a GameState) -> Self {
        let enemies = match unit.side().opponent() {
            Some(opponent) => state.units_of(opponent).filter(|u| u.is_alive()).collect(),
            None => Vec::new(),
        };
        Self::new(unit, state, enemies)
    }

    pub fn enemies(&self) -> &[&'a Unit] {
        &self.enemies
    }

    /// Number of enemies within `radius` of `center`.
    pub fn enemies_within(&self, center: HexCoord, radius: u32) -> usize {
        self.enemies
            .iter()
            .filter(|enemy| enemy.position().is_within(center, radius))
            .count()
    }

    /// Whether the unit could attack `target` if it stood on `from`.
    pub fn can_attack_from(&self, from: HexCoord, target: &Unit) -> bool {
        action::check_attack_from(self.unit, from, target).is_ok()
    }

    /// Whether the unit can attack `target` without moving.
    pub fn can_attack(&self, target: &Unit) -> bool {
        action::can_attack(self.unit, target)
    }

    /// Free tiles the unit can move to this turn.
    pub fn movement_options(&self) -> Vec<HexCoord> {
        action::reachable_tiles(self.state, self.unit)
    }
}
