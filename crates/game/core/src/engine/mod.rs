//! Action execution and the turn state machine.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! move, attack and turn transition flows through it so that unit flags,
//! unit positions and the board index change together.
//!
//! Actions run through three phases: pre_validate → apply → post_validate.
//! Pre-validation checks the whole action (including the attack leg of a
//! move-and-attack, from the destination) before anything is mutated.

mod errors;
mod turns;

pub use errors::{ExecuteError, TransitionPhase};
pub use turns::{TurnError, battle_result};

use crate::action::{self, Action, ActionError};
use crate::combat::{CombatOutcome, resolve_attack};
use crate::hex::HexCoord;
use crate::rng::RngOracle;
use crate::state::{GameState, Side, Unit, UnitId};

/// A unit stepping from one tile to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    pub from: HexCoord,
    pub to: HexCoord,
}

/// A unit removed from the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Casualty {
    pub unit: UnitId,
    pub side: Side,
    pub position: HexCoord,
}

/// Complete outcome of executing one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: UnitId,
    pub action: Action,
    pub movement: Option<Movement>,
    pub combat: Option<CombatOutcome>,
    /// Units that died during the action, in order of death.
    pub casualties: Vec<Casualty>,
}

impl ActionResult {
    fn new(actor: UnitId, action: Action) -> Self {
        Self {
            actor,
            action,
            movement: None,
            combat: None,
            casualties: Vec::new(),
        }
    }
}

/// Game engine that manages action execution and turn transitions.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes `action` for `actor`, drawing combat rolls from `rng`.
    ///
    /// The actor must belong to the side whose turn it is.
    pub fn execute<R>(
        &mut self,
        actor: UnitId,
        action: &Action,
        rng: &mut R,
    ) -> Result<ActionResult, ExecuteError>
    where
        R: RngOracle + ?Sized,
    {
        self.pre_validate(actor, action)
            .map_err(ExecuteError::rejected)?;

        let result = self.apply(actor, action, rng)?;

        if !self.state.is_consistent() {
            return Err(ExecuteError::Desync);
        }
        Ok(result)
    }

    fn pre_validate(&self, actor: UnitId, action: &Action) -> Result<(), ActionError> {
        let unit = self.lookup(actor)?;

        let phase = self.state.phase();
        if phase.active_side() != Some(unit.side()) {
            return Err(ActionError::NotUnitsTurn { unit: actor, phase });
        }

        match *action {
            Action::Wait => Ok(()),
            Action::Move { destination } => action::check_move(self.state, unit, destination),
            Action::Attack { target } => {
                let target = self.lookup(target)?;
                action::check_attack(unit, target)
            }
            Action::MoveAndAttack {
                destination,
                target,
            } => {
                action::check_move(self.state, unit, destination)?;
                let target = self.lookup(target)?;
                action::check_attack_from(unit, destination, target)
            }
        }
    }

    fn apply<R>(
        &mut self,
        actor: UnitId,
        action: &Action,
        rng: &mut R,
    ) -> Result<ActionResult, ExecuteError>
    where
        R: RngOracle + ?Sized,
    {
        let mut result = ActionResult::new(actor, *action);

        if let Some(destination) = action.destination() {
            result.movement = Some(self.apply_move(actor, destination)?);
        }

        if let Some(target) = action.target() {
            let (attacker, defender) = match (self.state.unit(actor), self.state.unit(target)) {
                (Some(attacker), Some(defender)) => (attacker, defender),
                _ => return Err(ExecuteError::Desync),
            };
            let outcome = resolve_attack(attacker, defender, rng);
            result.casualties = self.apply_combat(&outcome);
            result.combat = Some(outcome);
        }

        Ok(result)
    }

    fn apply_move(&mut self, actor: UnitId, destination: HexCoord) -> Result<Movement, ExecuteError> {
        let from = self.lookup(actor).map_err(ExecuteError::rejected)?.position();
        self.state.relocate(actor, destination)?;
        if let Some(unit) = self.state.unit_mut(actor) {
            unit.mark_moved();
        }
        Ok(Movement {
            from,
            to: destination,
        })
    }

    /// Writes a resolved attack into the state and removes the dead.
    fn apply_combat(&mut self, outcome: &CombatOutcome) -> Vec<Casualty> {
        let mut casualties = Vec::new();

        if let Some(attacker) = self.state.unit_mut(outcome.attacker) {
            attacker.mark_attacked();
        }

        if !outcome.was_dodged {
            let defender_down = self
                .state
                .unit_mut(outcome.defender)
                .is_some_and(|defender| defender.take_damage(outcome.damage_dealt) == 0);
            if defender_down {
                casualties.extend(self.remove_dead(outcome.defender));
            }
        }

        if let Some(counter) = outcome.counter_damage_dealt {
            let attacker_down = self
                .state
                .unit_mut(outcome.attacker)
                .is_some_and(|attacker| attacker.take_damage(counter) == 0);
            if attacker_down {
                casualties.extend(self.remove_dead(outcome.attacker));
            }
        }

        casualties
    }

    fn remove_dead(&mut self, id: UnitId) -> Option<Casualty> {
        self.state.remove_unit(id).map(|unit| Casualty {
            unit: unit.id(),
            side: unit.side(),
            position: unit.position(),
        })
    }

    fn lookup(&self, id: UnitId) -> Result<&Unit, ActionError> {
        self.state.unit(id).ok_or(ActionError::UnitNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::state::{TurnPhase, TurnState, UnitStats};

    fn duel(defender_health: u32) -> (GameState, UnitId, UnitId) {
        let mut state = GameState::default();
        let attacker = state
            .spawn(
                "Soldier",
                Side::SideA,
                UnitStats::new(120, 15, 8, 2, 1),
                HexCoord::new(0, 0),
            )
            .unwrap();
        let defender = state
            .spawn(
                "Enemy Scout",
                Side::SideB,
                UnitStats::new(100, 10, 5, 3, 1),
                HexCoord::new(1, 0),
            )
            .unwrap();
        state.unit_mut(defender).unwrap().take_damage(100 - defender_health);
        state.turn = TurnState::new(TurnPhase::SideATurn, 1);
        (state, attacker, defender)
    }

    #[test]
    fn attack_applies_damage_and_marks_attacker() {
        let (mut state, attacker, defender) = duel(12);
        let mut rng = ScriptedRng::new([99, 99, 99]);

        let result = GameEngine::new(&mut state)
            .execute(attacker, &Action::Attack { target: defender }, &mut rng)
            .unwrap();

        let combat = result.combat.unwrap();
        assert_eq!(combat.damage_dealt, 10);
        assert!(!combat.target_died);
        assert_eq!(state.unit(defender).unwrap().health(), 2);
        assert!(state.unit(attacker).unwrap().has_attacked());
        assert!(result.casualties.is_empty());
    }

    #[test]
    fn lethal_attack_removes_defender_from_board() {
        let (mut state, attacker, defender) = duel(10);
        let mut rng = ScriptedRng::new([99, 99]);

        let result = GameEngine::new(&mut state)
            .execute(attacker, &Action::Attack { target: defender }, &mut rng)
            .unwrap();

        assert!(result.combat.unwrap().target_died);
        assert_eq!(result.casualties.len(), 1);
        assert!(state.unit(defender).is_none());
        assert!(!state.board().is_occupied(HexCoord::new(1, 0)));
        assert_eq!(state.living_count(Side::SideB), 0);
    }

    #[test]
    fn lethal_counter_removes_the_attacker() {
        let mut state = GameState::default();
        let attacker = UnitId(1);
        let defender = UnitId(2);
        state
            .insert_unit(
                Unit::new(
                    attacker,
                    "Scout",
                    Side::SideA,
                    UnitStats::new(100, 15, 0, 3, 1),
                    HexCoord::new(0, 0),
                )
                .with_health(3),
            )
            .unwrap();
        state
            .insert_unit(Unit::new(
                defender,
                "Enemy Soldier",
                Side::SideB,
                UnitStats::new(120, 20, 5, 2, 1),
                HexCoord::new(1, 0),
            ))
            .unwrap();
        state.turn = TurnState::new(TurnPhase::SideATurn, 1);
        // dodge fails, crit fails, counter lands
        let mut rng = ScriptedRng::new([99, 99, 0]);

        let result = GameEngine::new(&mut state)
            .execute(attacker, &Action::Attack { target: defender }, &mut rng)
            .unwrap();

        let combat = result.combat.unwrap();
        assert_eq!(combat.damage_dealt, 10);
        assert_eq!(combat.counter_damage_dealt, Some(10));
        assert_eq!(combat.counter_target_died, Some(true));
        assert_eq!(
            result.casualties,
            vec![Casualty {
                unit: attacker,
                side: Side::SideA,
                position: HexCoord::new(0, 0),
            }]
        );
        assert!(state.unit(attacker).is_none());
        assert!(!state.board().is_occupied(HexCoord::new(0, 0)));
        assert_eq!(state.unit(defender).unwrap().health(), 110);
        assert!(state.is_consistent());
        assert_eq!(battle_result(&state), Some(TurnPhase::Defeat));
    }

    #[test]
    fn dodged_attack_still_spends_the_attack() {
        let (mut state, attacker, defender) = duel(50);
        let mut rng = ScriptedRng::new([0]);

        let result = GameEngine::new(&mut state)
            .execute(attacker, &Action::Attack { target: defender }, &mut rng)
            .unwrap();

        assert!(result.combat.unwrap().was_dodged);
        assert_eq!(state.unit(defender).unwrap().health(), 50);
        assert!(state.unit(attacker).unwrap().has_attacked());
    }

    #[test]
    fn move_and_attack_is_validated_up_front() {
        let (mut state, attacker, defender) = duel(50);
        let mut rng = ScriptedRng::default();

        // (-2, 0) is three tiles from the defender: attack leg fails, nothing moves
        let err = GameEngine::new(&mut state)
            .execute(
                attacker,
                &Action::MoveAndAttack {
                    destination: HexCoord::new(-2, 0),
                    target: defender,
                },
                &mut rng,
            )
            .unwrap_err();

        assert!(matches!(
            err.action_error(),
            Some(ActionError::OutOfAttackRange { .. })
        ));
        assert_eq!(
            state.unit(attacker).unwrap().position(),
            HexCoord::new(0, 0)
        );
        assert!(!state.unit(attacker).unwrap().has_moved());
    }

    #[test]
    fn move_updates_board_and_unit_together() {
        let (mut state, attacker, _) = duel(50);
        let mut rng = ScriptedRng::default();
        let destination = HexCoord::new(0, 2);

        let result = GameEngine::new(&mut state)
            .execute(attacker, &Action::Move { destination }, &mut rng)
            .unwrap();

        assert_eq!(
            result.movement,
            Some(Movement {
                from: HexCoord::new(0, 0),
                to: destination
            })
        );
        assert_eq!(state.board().tile_at(destination), Some(attacker));
        assert!(state.unit(attacker).unwrap().has_moved());
        assert!(state.is_consistent());
    }

    #[test]
    fn off_turn_units_are_rejected() {
        let (mut state, _, defender) = duel(50);
        let mut rng = ScriptedRng::default();

        let err = GameEngine::new(&mut state)
            .execute(defender, &Action::Wait, &mut rng)
            .unwrap_err();

        assert!(matches!(
            err.action_error(),
            Some(ActionError::NotUnitsTurn { .. })
        ));
    }
}
