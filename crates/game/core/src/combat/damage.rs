//! Damage calculation and application.

use crate::config::GameConfig;

/// Damage of a regular hit.
///
/// ```text
/// base_damage = max(1, attack - defense)
/// ```
pub fn base_damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(GameConfig::MIN_DAMAGE)
}

/// Damage of a critical hit, rounded to the nearest integer (halves to even)
/// and never below the minimum.
pub fn critical_damage(base: u32, multiplier: f32) -> u32 {
    let scaled = (base as f32 * multiplier.max(0.0)).round_ties_even();
    (scaled as u32).max(GameConfig::MIN_DAMAGE)
}

/// Damage of a counterattack.
///
/// ```text
/// counter_damage = max(1, floor(defender_attack / 2) - attacker_defense)
/// ```
pub fn counter_damage(defender_attack: u32, attacker_defense: u32) -> u32 {
    (defender_attack / 2)
        .saturating_sub(attacker_defense)
        .max(GameConfig::MIN_DAMAGE)
}

/// Apply damage to current HP.
///
/// Returns the new HP value, clamped to 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}
