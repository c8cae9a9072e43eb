//! Combat result types and attack resolution.

use crate::rng::RngOracle;
use crate::state::{Unit, UnitId};

use super::damage::{base_damage, counter_damage, critical_damage};

/// Coarse classification of the initial strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// The defender dodged.
    Miss,
    /// Regular hit.
    Hit,
    /// Critical hit.
    Critical,
}

/// Everything that happened during one attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub was_dodged: bool,
    pub was_critical: bool,
    /// Damage dealt to the defender (0 on a dodge).
    pub damage_dealt: u32,
    pub target_died: bool,
    /// Damage dealt back to the attacker, if a counterattack happened.
    pub counter_damage_dealt: Option<u32>,
    /// Whether the counterattack killed the attacker, if one happened.
    pub counter_target_died: Option<bool>,
}

impl CombatOutcome {
    pub fn kind(&self) -> AttackOutcome {
        if self.was_dodged {
            AttackOutcome::Miss
        } else if self.was_critical {
            AttackOutcome::Critical
        } else {
            AttackOutcome::Hit
        }
    }

    pub fn countered(&self) -> bool {
        self.counter_damage_dealt.is_some()
    }

    fn dodged(attacker: UnitId, defender: UnitId) -> Self {
        Self {
            attacker,
            defender,
            was_dodged: true,
            was_critical: false,
            damage_dealt: 0,
            target_died: false,
            counter_damage_dealt: None,
            counter_target_died: None,
        }
    }
}

/// Resolve one attack from `attacker` against `defender`.
///
/// Rolls are drawn in a fixed order and only when needed:
///
/// 1. Dodge: `roll < defender.dodge_chance` ends the attack as a miss.
/// 2. Critical: `roll < attacker.crit_chance` scales the base damage.
/// 3. Counter: only if the defender survives, has not attacked this turn and
///    can reach the attacker; `roll < defender.counter_chance` strikes back
///    once with no dodge, critical or further counter.
///
/// The caller is responsible for eligibility (range, side, flags) of the
/// initial attack and for applying the outcome.
pub fn resolve_attack<R>(attacker: &Unit, defender: &Unit, rng: &mut R) -> CombatOutcome
where
    R: RngOracle + ?Sized,
{
    let attacker_stats = attacker.stats();
    let defender_stats = defender.stats();

    // 1. Dodge
    if rng.roll_percent() < defender_stats.dodge_chance {
        return CombatOutcome::dodged(attacker.id(), defender.id());
    }

    // 2. Critical
    let was_critical = rng.roll_percent() < attacker_stats.crit_chance;

    // 3-4. Damage
    let base = base_damage(attacker_stats.attack, defender_stats.defense);
    let damage_dealt = if was_critical {
        critical_damage(base, attacker_stats.crit_multiplier)
    } else {
        base
    };

    // 5. Death check
    let target_died = defender.health() <= damage_dealt;

    // 6. Counterattack
    let mut counter_damage_dealt = None;
    let mut counter_target_died = None;
    let can_counter = !target_died
        && !defender.has_attacked()
        && defender
            .position()
            .is_within(attacker.position(), defender_stats.attack_range);

    if can_counter && rng.roll_percent() < defender_stats.counter_chance {
        let damage = counter_damage(defender_stats.attack, attacker_stats.defense);
        counter_damage_dealt = Some(damage);
        counter_target_died = Some(attacker.health() <= damage);
    }

    CombatOutcome {
        attacker: attacker.id(),
        defender: defender.id(),
        was_dodged: false,
        was_critical,
        damage_dealt,
        target_died,
        counter_damage_dealt,
        counter_target_died,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hex::HexCoord;
    use crate::rng::ScriptedRng;
    use crate::state::{Side, UnitStats};

    fn unit(id: u32, side: Side, stats: UnitStats, position: HexCoord) -> Unit {
        Unit::new(UnitId(id), "unit", side, stats, position)
    }

    fn duel(defender_health: u32) -> (Unit, Unit) {
        let attacker = unit(
            1,
            Side::SideA,
            UnitStats::new(100, 15, 5, 3, 1),
            HexCoord::new(0, 0),
        );
        let defender = unit(
            2,
            Side::SideB,
            UnitStats::new(100, 15, 5, 3, 1),
            HexCoord::new(1, 0),
        )
        .with_health(defender_health);
        (attacker, defender)
    }

    #[test]
    fn regular_hit_without_counter() {
        let (attacker, defender) = duel(12);
        // dodge fails, crit fails, counter fails
        let mut rng = ScriptedRng::new([99, 99, 99]);

        let outcome = resolve_attack(&attacker, &defender, &mut rng);

        assert_eq!(outcome.kind(), AttackOutcome::Hit);
        assert_eq!(outcome.damage_dealt, 10);
        assert!(!outcome.target_died);
        assert_eq!(outcome.counter_damage_dealt, None);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn dodge_draws_a_single_roll() {
        let (attacker, defender) = duel(50);
        let mut rng = ScriptedRng::new([0, 0, 0]);

        let outcome = resolve_attack(&attacker, &defender, &mut rng);

        assert!(outcome.was_dodged);
        assert_eq!(outcome.damage_dealt, 0);
        assert_eq!(outcome.counter_target_died, None);
        assert_eq!(rng.remaining(), 2);
    }

    #[test]
    fn critical_scales_damage() {
        let (attacker, defender) = duel(100);
        let mut rng = ScriptedRng::new([99, 0, 99]);

        let outcome = resolve_attack(&attacker, &defender, &mut rng);

        assert!(outcome.was_critical);
        assert_eq!(outcome.damage_dealt, 15);
    }

    #[test]
    fn lethal_hit_skips_counter_roll() {
        let (attacker, defender) = duel(10);
        let mut rng = ScriptedRng::new([99, 99, 0]);

        let outcome = resolve_attack(&attacker, &defender, &mut rng);

        assert!(outcome.target_died);
        assert!(!outcome.countered());
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn surviving_defender_counters() {
        let (attacker, defender) = duel(40);
        let mut rng = ScriptedRng::new([99, 99, 0]);

        let outcome = resolve_attack(&attacker, &defender, &mut rng);

        // floor(15 / 2) - 5 = 2
        assert_eq!(outcome.counter_damage_dealt, Some(2));
        assert_eq!(outcome.counter_target_died, Some(false));
    }

    #[test]
    fn out_of_reach_defender_cannot_counter() {
        let attacker = unit(
            1,
            Side::SideA,
            UnitStats::new(80, 20, 3, 2, 3),
            HexCoord::new(0, 0),
        );
        let defender = unit(
            2,
            Side::SideB,
            UnitStats::new(100, 10, 5, 3, 1),
            HexCoord::new(3, 0),
        );
        let mut rng = ScriptedRng::new([99, 99, 0]);

        let outcome = resolve_attack(&attacker, &defender, &mut rng);

        assert!(!outcome.countered());
        assert_eq!(rng.remaining(), 1);
    }
}
