use bitflags::bitflags;

use crate::hex::HexCoord;

use super::{Side, UnitId};

bitflags! {
    /// What a unit has already done during its side's current turn.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TurnFlags: u8 {
        const MOVED = 1 << 0;
        const ATTACKED = 1 << 1;
    }
}

/// Per-turn lifecycle of a unit, derived from its [`TurnFlags`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum UnitPhase {
    Fresh,
    Moved,
    Attacked,
    MovedAndAttacked,
}

impl From<TurnFlags> for UnitPhase {
    fn from(flags: TurnFlags) -> Self {
        match (
            flags.contains(TurnFlags::MOVED),
            flags.contains(TurnFlags::ATTACKED),
        ) {
            (false, false) => Self::Fresh,
            (true, false) => Self::Moved,
            (false, true) => Self::Attacked,
            (true, true) => Self::MovedAndAttacked,
        }
    }
}

/// Static combat statistics of a unit.
///
/// Chances are percentages in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitStats {
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub movement_range: u32,
    pub attack_range: u32,
    pub max_energy: u32,
    pub crit_chance: u32,
    pub crit_multiplier: f32,
    pub dodge_chance: u32,
    pub counter_chance: u32,
}

impl UnitStats {
    /// Stats with the five headline values set and the rest at their defaults.
    pub fn new(
        max_health: u32,
        attack: u32,
        defense: u32,
        movement_range: u32,
        attack_range: u32,
    ) -> Self {
        Self {
            max_health,
            attack,
            defense,
            movement_range,
            attack_range,
            ..Self::default()
        }
    }

    pub fn with_critical(mut self, chance: u32, multiplier: f32) -> Self {
        self.crit_chance = chance;
        self.crit_multiplier = multiplier;
        self
    }

    pub fn with_dodge_chance(mut self, chance: u32) -> Self {
        self.dodge_chance = chance;
        self
    }

    pub fn with_counter_chance(mut self, chance: u32) -> Self {
        self.counter_chance = chance;
        self
    }
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            max_health: 100,
            attack: 10,
            defense: 5,
            movement_range: 3,
            attack_range: 1,
            max_energy: 100,
            crit_chance: 10,
            crit_multiplier: 1.5,
            dodge_chance: 5,
            counter_chance: 30,
        }
    }
}

/// A combatant on the board.
///
/// Position and turn flags are only changed by the engine so that the board
/// index and the unit always agree. Health is clamped to `[0, max_health]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    name: String,
    description: String,
    side: Side,
    stats: UnitStats,
    health: u32,
    energy: u32,
    position: HexCoord,
    flags: TurnFlags,
}

impl Unit {
    /// Creates a fresh unit at full health and energy.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        side: Side,
        stats: UnitStats,
        position: HexCoord,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            side,
            stats,
            health: stats.max_health,
            energy: stats.max_energy,
            position,
            flags: TurnFlags::empty(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Overrides current health, clamped to `max_health`.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.stats.max_health);
        self
    }

    /// Overrides current energy, clamped to `max_energy`.
    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy.min(self.stats.max_energy);
        self
    }

    pub fn with_flags(mut self, flags: TurnFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn stats(&self) -> &UnitStats {
        &self.stats
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.stats.max_health
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn position(&self) -> HexCoord {
        self.position
    }

    pub fn flags(&self) -> TurnFlags {
        self.flags
    }

    pub fn phase(&self) -> UnitPhase {
        self.flags.into()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_moved(&self) -> bool {
        self.flags.contains(TurnFlags::MOVED)
    }

    pub fn has_attacked(&self) -> bool {
        self.flags.contains(TurnFlags::ATTACKED)
    }

    /// True once the unit has both moved and attacked this turn.
    pub fn is_spent(&self) -> bool {
        self.flags.contains(TurnFlags::MOVED | TurnFlags::ATTACKED)
    }

    /// Remaining health as a fraction of maximum, in `[0, 1]`.
    pub fn health_fraction(&self) -> f32 {
        if self.stats.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.stats.max_health as f32
    }

    /// Reduces health, never below zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = crate::combat::apply_damage(self.health, amount);
        self.health
    }

    /// Clears the moved/attacked flags at the start of the unit's side turn.
    pub fn reset_turn_flags(&mut self) {
        self.flags = TurnFlags::empty();
    }

    pub(crate) fn mark_moved(&mut self) {
        self.flags.insert(TurnFlags::MOVED);
    }

    pub(crate) fn mark_attacked(&mut self) {
        self.flags.insert(TurnFlags::ATTACKED);
    }

    pub(crate) fn set_position(&mut self, position: HexCoord) {
        self.position = position;
    }
}
