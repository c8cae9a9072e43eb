//! Decision entry point for automated units.

use std::cmp::Reverse;

use tactics_core::action;
use tactics_core::{Action, AiProfile, GameState, HexCoord, Side, Unit, UnitId};

use super::scoring::{AttackScore, approach_score};
use super::AiContext;
use crate::api::ActionProvider;

/// Best candidate found so far; later candidates must score strictly higher.
struct Best<T> {
    candidate: T,
    score: f32,
}

fn consider<T>(best: &mut Option<Best<T>>, candidate: T, score: f32) {
    if best.as_ref().is_none_or(|current| score > current.score) {
        *best = Some(Best { candidate, score });
    }
}

/// Heuristic AI controller configured by an [`AiProfile`].
///
/// Decisions are pure: the same state always yields the same action.
#[derive(Debug, Clone, Default)]
pub struct AiController {
    profile: AiProfile,
}

impl AiController {
    pub fn new(profile: AiProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    /// Decides for `unit` against the living units of the opposing side.
    ///
    /// Unknown or dead units wait.
    pub fn decide(&self, state: &GameState, unit: UnitId) -> Action {
        match state.unit(unit) {
            Some(unit) if unit.is_alive() => self.decide_with(&AiContext::for_unit(unit, state)),
            _ => Action::Wait,
        }
    }

    /// Decides for `unit` against an explicit list of enemies.
    pub fn decide_against(&self, state: &GameState, unit: &Unit, enemies: &[&Unit]) -> Action {
        self.decide_with(&AiContext::new(unit, state, enemies.to_vec()))
    }

    pub fn decide_with(&self, ctx: &AiContext<'_>) -> Action {
        let unit = ctx.unit.id();

        if let Some((target, score)) = self.find_best_attack_target(ctx) {
            tracing::debug!(%unit, %target, ?score, "AI attacks in place");
            return Action::Attack { target };
        }

        let options = ctx.movement_options();
        if options.is_empty() {
            tracing::debug!(%unit, "AI has no movement options; waiting");
            return Action::Wait;
        }

        if let Some(best) = self.best_move_and_attack(ctx, &options) {
            let (destination, target) = best.candidate;
            tracing::debug!(%unit, %destination, %target, score = best.score, "AI moves and attacks");
            return Action::MoveAndAttack {
                destination,
                target,
            };
        }

        match self.best_approach(ctx, &options) {
            Some(best) => {
                tracing::debug!(%unit, destination = %best.candidate, score = best.score, "AI approaches");
                Action::Move {
                    destination: best.candidate,
                }
            }
            None => {
                tracing::debug!(%unit, "AI found no enemy to approach; waiting");
                Action::Wait
            }
        }
    }

    /// Best enemy attackable from the current position, with its score.
    pub fn find_best_attack_target(&self, ctx: &AiContext<'_>) -> Option<(UnitId, AttackScore)> {
        let mut best: Option<Best<(UnitId, AttackScore)>> = None;
        for enemy in ctx.enemies() {
            if !ctx.can_attack(enemy) {
                continue;
            }
            let score = AttackScore::evaluate(&self.profile, ctx, enemy);
            consider(&mut best, (enemy.id(), score), score.value());
        }
        best.map(|best| best.candidate)
    }

    fn best_move_and_attack(
        &self,
        ctx: &AiContext<'_>,
        options: &[HexCoord],
    ) -> Option<Best<(HexCoord, UnitId)>> {
        let mut best = None;
        for &tile in options {
            for enemy in ctx.enemies() {
                if !ctx.can_attack_from(tile, enemy) {
                    continue;
                }
                let score = AttackScore::evaluate(&self.profile, ctx, enemy);
                consider(&mut best, (tile, enemy.id()), score.value());
            }
        }
        best
    }

    fn best_approach(&self, ctx: &AiContext<'_>, options: &[HexCoord]) -> Option<Best<HexCoord>> {
        let mut best = None;
        for &tile in options {
            for enemy in ctx.enemies() {
                let distance = tile.distance(enemy.position());
                consider(&mut best, tile, approach_score(&self.profile, distance, enemy));
            }
        }
        best
    }
}

impl ActionProvider for AiController {
    fn provide_action(&self, unit: UnitId, state: &GameState) -> Action {
        self.decide(state, unit)
    }
}

/// Order in which `side`'s living units act.
///
/// Units able to attack an enemy from where they stand go first; within each
/// group, longer attack range goes first. Otherwise roster order is kept.
pub fn turn_order(state: &GameState, side: Side) -> Vec<UnitId> {
    let mut units: Vec<(bool, u32, UnitId)> = state
        .units_of(side)
        .filter(|unit| unit.is_alive())
        .map(|unit| {
            let ctx = AiContext::for_unit(unit, state);
            let ready = ctx.enemies().iter().any(|enemy| action::can_attack(unit, enemy));
            (ready, unit.stats().attack_range, unit.id())
        })
        .collect();

    units.sort_by_key(|&(ready, range, _)| (Reverse(ready), Reverse(range)));
    units.into_iter().map(|(_, _, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::UnitStats;

    fn enemy_scout() -> UnitStats {
        UnitStats::new(90, 8, 4, 3, 1)
    }

    #[test]
    fn adjacent_enemy_is_attacked_without_moving() {
        let mut state = GameState::default();
        let ai = state
            .spawn("Enemy Scout", Side::SideB, enemy_scout(), HexCoord::new(0, 0))
            .unwrap();
        let adjacent = state
            .spawn("Soldier", Side::SideA, UnitStats::default(), HexCoord::new(1, 0))
            .unwrap();
        // Nearly dead and reachable: a post-move attack would kill it
        state
            .insert_unit(
                Unit::new(
                    UnitId(3),
                    "Scout",
                    Side::SideA,
                    UnitStats::default(),
                    HexCoord::new(-3, 0),
                )
                .with_health(5),
            )
            .unwrap();

        let action = AiController::default().decide(&state, ai);
        assert_eq!(action, Action::Attack { target: adjacent });
    }

    #[test]
    fn moves_into_range_and_attacks() {
        let mut state = GameState::default();
        let ai = state
            .spawn("Enemy Scout", Side::SideB, enemy_scout(), HexCoord::new(0, 0))
            .unwrap();
        let target = state
            .spawn("Scout", Side::SideA, UnitStats::default(), HexCoord::new(3, 0))
            .unwrap();

        let action = AiController::default().decide(&state, ai);
        match action {
            Action::MoveAndAttack {
                destination,
                target: chosen,
            } => {
                assert_eq!(chosen, target);
                assert_eq!(destination.distance(HexCoord::new(3, 0)), 1);
                assert!(destination.distance(HexCoord::new(0, 0)) <= 3);
            }
            other => panic!("expected move-and-attack, got {other}"),
        }
    }

    #[test]
    fn out_of_reach_enemies_are_approached() {
        let mut state = GameState::default();
        let ai = state
            .spawn(
                "Enemy Soldier",
                Side::SideB,
                UnitStats::new(110, 12, 7, 2, 1),
                HexCoord::new(-5, 0),
            )
            .unwrap();
        state
            .spawn("Scout", Side::SideA, UnitStats::default(), HexCoord::new(5, 0))
            .unwrap();

        let Action::Move { destination } = AiController::default().decide(&state, ai) else {
            panic!("expected a move");
        };
        // Movement range 2 closes the gap from 10 to 8
        assert_eq!(destination.distance(HexCoord::new(5, 0)), 8);
    }

    #[test]
    fn spent_or_moved_units_wait() {
        let mut state = GameState::default();
        let ai = state
            .spawn("Enemy Scout", Side::SideB, enemy_scout(), HexCoord::new(0, 0))
            .unwrap();
        state
            .spawn("Scout", Side::SideA, UnitStats::default(), HexCoord::new(4, 0))
            .unwrap();

        let moved = state
            .unit(ai)
            .unwrap()
            .clone()
            .with_flags(tactics_core::TurnFlags::MOVED);
        let enemies: Vec<&Unit> = state.units_of(Side::SideA).collect();

        assert_eq!(
            AiController::default().decide_against(&state, &moved, &enemies),
            Action::Wait
        );
    }

    #[test]
    fn no_enemies_means_wait() {
        let mut state = GameState::default();
        let ai = state
            .spawn("Enemy Scout", Side::SideB, enemy_scout(), HexCoord::new(0, 0))
            .unwrap();

        assert_eq!(AiController::default().decide(&state, ai), Action::Wait);
        assert_eq!(AiController::default().decide(&state, UnitId(99)), Action::Wait);
    }

    #[test]
    fn ready_attackers_act_first_then_longer_range() {
        let mut state = GameState::default();
        let scout = state
            .spawn("Enemy Scout", Side::SideB, enemy_scout(), HexCoord::new(-4, 0))
            .unwrap();
        let sniper = state
            .spawn(
                "Enemy Sniper",
                Side::SideB,
                UnitStats::new(70, 18, 2, 2, 3),
                HexCoord::new(4, -4),
            )
            .unwrap();
        let soldier = state
            .spawn(
                "Enemy Soldier",
                Side::SideB,
                UnitStats::new(110, 12, 7, 2, 1),
                HexCoord::new(1, 0),
            )
            .unwrap();
        state
            .spawn("Soldier", Side::SideA, UnitStats::default(), HexCoord::new(0, 0))
            .unwrap();

        assert_eq!(turn_order(&state, Side::SideB), vec![soldier, sniper, scout]);
    }
}
