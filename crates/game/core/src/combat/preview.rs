//! Roll-free combat estimates.

use crate::state::Unit;

use super::damage::base_damage;

/// What an attack would do if it landed without a critical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatPreview {
    pub estimated_damage: u32,
    pub can_kill: bool,
}

/// Estimates the outcome of `attacker` hitting `defender`.
pub fn preview(attacker: &Unit, defender: &Unit) -> CombatPreview {
    let estimated_damage = base_damage(attacker.stats().attack, defender.stats().defense);
    CombatPreview {
        estimated_damage,
        can_kill: defender.health() <= estimated_damage,
    }
}
