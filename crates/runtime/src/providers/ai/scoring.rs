//! Attack and approach scoring.
//!
//! ```text
//! attack   = (damage + kill_bonus + weakness_bonus - exposure_penalty)
//!            × (0.5 + aggressiveness)
//! approach = -distance + (1 - health_fraction) × approach_weakness_weight
//! ```

use tactics_core::combat;
use tactics_core::{AiProfile, Unit};

use super::AiContext;

/// Structured attack score.
///
/// Components are kept apart so that decisions can be logged and inspected;
/// use [`value`](Self::value) for comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackScore {
    /// Non-critical damage the attack would deal.
    pub estimated_damage: u32,

    /// Awarded when the estimate is lethal.
    pub kill_bonus: f32,

    /// Grows as the defender's health fraction falls.
    pub weakness_bonus: f32,

    /// Subtracted for non-tank attackers standing near enemies.
    ///
    /// Counted around the attacker's current position, also when scoring a
    /// move-then-attack from another tile.
    pub exposure_penalty: f32,

    /// `0.5 + aggressiveness`.
    pub multiplier: f32,
}

impl AttackScore {
    /// Scores the deciding unit attacking `defender`.
    pub fn evaluate(profile: &AiProfile, ctx: &AiContext<'_>, defender: &Unit) -> Self {
        let attacker = ctx.unit;
        let preview = combat::preview(attacker, defender);

        let kill_bonus = if preview.can_kill {
            profile.kill_bonus
        } else {
            0.0
        };
        let weakness_bonus = (1.0 - defender.health_fraction()) * profile.weakness_weight;

        let exposure_penalty = if attacker.stats().defense < profile.tank_defense_threshold {
            let nearby = ctx.enemies_within(attacker.position(), profile.exposure_radius);
            nearby as f32 * profile.exposure_penalty
        } else {
            0.0
        };

        Self {
            estimated_damage: preview.estimated_damage,
            kill_bonus,
            weakness_bonus,
            exposure_penalty,
            multiplier: 0.5 + profile.aggressiveness,
        }
    }

    /// Final comparable score.
    pub fn value(&self) -> f32 {
        let raw = self.estimated_damage as f32 + self.kill_bonus + self.weakness_bonus
            - self.exposure_penalty;
        raw * self.multiplier
    }
}

/// Scores ending a move `distance` away from `defender`.
pub fn approach_score(profile: &AiProfile, distance: u32, defender: &Unit) -> f32 {
    -(distance as f32) + (1.0 - defender.health_fraction()) * profile.approach_weakness_weight
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{GameState, HexCoord, Side, UnitStats};

    #[test]
    fn lethal_hits_on_wounded_targets_score_highest() {
        let mut state = GameState::default();
        let sniper = state
            .spawn(
                "Enemy Sniper",
                Side::SideB,
                UnitStats::new(70, 18, 2, 2, 3),
                HexCoord::new(0, 0),
            )
            .unwrap();
        let scout = state
            .spawn(
                "Scout",
                Side::SideA,
                UnitStats::new(100, 10, 5, 3, 1),
                HexCoord::new(3, 0),
            )
            .unwrap();

        let ctx = AiContext::for_unit(state.unit(sniper).unwrap(), &state);
        let target = state.unit(scout).unwrap().clone().with_health(10);
        let score = AttackScore::evaluate(&AiProfile::default(), &ctx, &target);

        // 13 damage kills 10 HP; weakness (1 - 0.1) * 20 = 18; nobody within 2
        assert_eq!(score.estimated_damage, 13);
        assert_eq!(score.kill_bonus, 100.0);
        assert!((score.weakness_bonus - 18.0).abs() < 1e-4);
        assert_eq!(score.exposure_penalty, 0.0);
        assert!((score.value() - 131.0 * 1.1).abs() < 1e-3);
    }

    #[test]
    fn exposure_only_penalises_non_tanks() {
        let mut state = GameState::default();
        let scout = state
            .spawn(
                "Enemy Scout",
                Side::SideB,
                UnitStats::new(90, 8, 4, 3, 1),
                HexCoord::new(0, 0),
            )
            .unwrap();
        let soldier = state
            .spawn(
                "Enemy Soldier",
                Side::SideB,
                UnitStats::new(110, 12, 7, 2, 1),
                HexCoord::new(0, -1),
            )
            .unwrap();
        let target = state
            .spawn("Scout", Side::SideA, UnitStats::default(), HexCoord::new(1, 0))
            .unwrap();
        state
            .spawn("Soldier", Side::SideA, UnitStats::default(), HexCoord::new(2, -1))
            .unwrap();

        let profile = AiProfile::default();
        let target = state.unit(target).unwrap();

        let ctx = AiContext::for_unit(state.unit(scout).unwrap(), &state);
        let exposed = AttackScore::evaluate(&profile, &ctx, target);
        assert_eq!(exposed.exposure_penalty, 10.0);

        let ctx = AiContext::for_unit(state.unit(soldier).unwrap(), &state);
        let tank = AttackScore::evaluate(&profile, &ctx, target);
        assert_eq!(tank.exposure_penalty, 0.0);
    }

    #[test]
    fn approach_prefers_closer_and_weaker() {
        let profile = AiProfile::default();
        let healthy = tactics_core::Unit::new(
            tactics_core::UnitId(1),
            "Scout",
            Side::SideA,
            UnitStats::default(),
            HexCoord::ORIGIN,
        );
        let wounded = healthy.clone().with_health(50);

        assert_eq!(approach_score(&profile, 4, &healthy), -4.0);
        assert!(approach_score(&profile, 4, &wounded) > approach_score(&profile, 3, &healthy));
    }
}
