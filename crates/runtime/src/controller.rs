//! Turn controller: owns a battle and drives it one unit at a time.
//!
//! The controller holds the [`GameState`], the roll source, the action
//! provider for automated sides and the presentation sink. Nothing else
//! mutates the battle. Automated turns advance through
//! [`TurnController::process_next_unit`], an explicit step function the
//! caller invokes repeatedly (synchronously in tests, paced by a timer in
//! the client).

use std::collections::{BTreeSet, VecDeque};

use tactics_core::{
    Action, ActionResult, AiProfile, GameEngine, GameSnapshot, GameState, HexCoord, PcgRng,
    RngOracle, Side, TurnPhase, UnitId,
};

use crate::api::{ActionProvider, Result, RuntimeError};
use crate::events::{GameEvent, NullSink, PresentationSink};
use crate::providers::{AiController, turn_order};
use crate::repository::{SaveFile, SaveMetadata, SaveSlot, SnapshotRepository};
use crate::rng::EntropyRng;

/// One automated unit's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionTaken {
    pub unit: UnitId,
    /// What the provider asked for.
    pub decided: Action,
    /// What actually ran; a refused decision runs as [`Action::Wait`].
    pub result: ActionResult,
}

impl ActionTaken {
    pub fn was_refused(&self) -> bool {
        self.result.action != self.decided
    }
}

/// Drives a battle through the turn state machine.
pub struct TurnController {
    state: GameState,
    rng: Box<dyn RngOracle + Send>,
    sink: Box<dyn PresentationSink>,
    provider: Box<dyn ActionProvider>,
    automated: BTreeSet<Side>,
    pending: VecDeque<UnitId>,
    battle_reported: bool,
}

impl TurnController {
    /// Create a builder for `state`.
    pub fn builder(state: GameState) -> TurnControllerBuilder {
        TurnControllerBuilder::new(state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn_number()
    }

    pub fn is_over(&self) -> bool {
        self.phase().is_terminal()
    }

    pub fn is_automated(&self, side: Side) -> bool {
        self.automated.contains(&side)
    }

    /// Units still waiting to act in the current automated side turn.
    pub fn pending_units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.pending.iter().copied()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.to_snapshot()
    }

    /// Leaves setup and starts SideA's first turn.
    pub fn start_first_turn(&mut self) -> Result<usize> {
        let refreshed = GameEngine::new(&mut self.state).start_first_turn()?;
        self.on_side_turn_started(Side::SideA);
        Ok(refreshed)
    }

    /// Hands the turn to `side`, refreshing its units.
    pub fn start_side_turn(&mut self, side: Side) -> Result<usize> {
        let refreshed = GameEngine::new(&mut self.state).start_side_turn(side)?;
        self.on_side_turn_started(side);
        Ok(refreshed)
    }

    /// Ends the active side's turn and starts the opponent's, unless the
    /// battle is decided. Returns the resulting phase.
    pub fn end_side_turn(&mut self) -> Result<TurnPhase> {
        self.pending.clear();
        let phase = GameEngine::new(&mut self.state).end_side_turn()?;

        match phase.active_side() {
            Some(side) => self.on_side_turn_started(side),
            None if phase.is_terminal() => self.report_battle_end(phase),
            None => {}
        }
        Ok(phase)
    }

    /// Enters and reports the terminal phase if a side has been wiped out.
    pub fn check_end_conditions(&mut self) -> Option<TurnPhase> {
        let result = GameEngine::new(&mut self.state).check_end_conditions()?;
        self.pending.clear();
        self.report_battle_end(result);
        Some(result)
    }

    /// Lets the next queued automated unit act.
    ///
    /// Dead units and units that already moved and attacked are skipped.
    /// Returns `None` once the queue is empty or the battle is over; the
    /// caller then ends the side turn.
    pub fn process_next_unit(&mut self) -> Result<Option<ActionTaken>> {
        while let Some(unit) = self.pending.pop_front() {
            if self.is_over() {
                self.pending.clear();
                break;
            }
            match self.state.unit(unit) {
                Some(current) if current.is_alive() && !current.is_spent() => {}
                _ => continue,
            }

            let decided = self.provider.provide_action(unit, &self.state);
            let result = match self.execute(unit, &decided) {
                Ok(result) => result,
                Err(RuntimeError::Execute(error)) if error.action_error().is_some() => {
                    tracing::warn!(%unit, action = %decided, %error, "Decision refused; waiting instead");
                    self.execute(unit, &Action::Wait)?
                }
                Err(error) => return Err(error),
            };

            return Ok(Some(ActionTaken {
                unit,
                decided,
                result,
            }));
        }
        Ok(None)
    }

    /// Runs every living unit of `side` once, in [`turn_order`].
    ///
    /// `side` must be the active side. Does not end the turn.
    pub fn process_side_turn(&mut self, side: Side) -> Result<Vec<ActionTaken>> {
        let phase = self.phase();
        if phase.active_side() != Some(side) {
            return Err(RuntimeError::NotSidesTurn { side, phase });
        }

        self.pending = turn_order(&self.state, side).into();
        let mut taken = Vec::new();
        while let Some(action) = self.process_next_unit()? {
            taken.push(action);
        }
        Ok(taken)
    }

    /// Moves a unit of the active side on request (player input).
    pub fn request_move(&mut self, unit: UnitId, destination: HexCoord) -> Result<ActionResult> {
        self.execute(unit, &Action::Move { destination })
    }

    /// Attacks with a unit of the active side on request (player input).
    pub fn request_attack(&mut self, unit: UnitId, target: UnitId) -> Result<ActionResult> {
        self.execute(unit, &Action::Attack { target })
    }

    /// Executes any action for a unit of the active side.
    pub fn request(&mut self, unit: UnitId, action: &Action) -> Result<ActionResult> {
        self.execute(unit, action)
    }

    /// Saves the battle into `slot` of `repository`.
    pub fn save<R>(
        &self,
        repository: &R,
        slot: SaveSlot,
        save_name: impl Into<String>,
    ) -> Result<SaveMetadata>
    where
        R: SnapshotRepository + ?Sized,
    {
        let save = SaveFile::capture(slot, save_name, &self.state);
        repository.save(slot, &save)?;
        tracing::info!(%slot, turn = save.metadata.turn_number, "Battle saved");
        Ok(save.metadata)
    }

    /// Replaces the battle with the one saved in `slot`.
    ///
    /// If the restored turn belongs to an automated side, its living units
    /// are queued again.
    pub fn load<R>(&mut self, repository: &R, slot: SaveSlot) -> Result<SaveMetadata>
    where
        R: SnapshotRepository + ?Sized,
    {
        let save = repository
            .load(slot)?
            .ok_or(RuntimeError::MissingSave(slot))?;
        self.state = save.restore()?;

        let phase = self.phase();
        self.battle_reported = phase.is_terminal();
        self.pending.clear();
        if let Some(side) = phase.active_side() {
            self.queue_automated(side);
        }

        tracing::info!(%slot, turn = save.metadata.turn_number, %phase, "Battle loaded");
        Ok(save.metadata)
    }

    fn execute(&mut self, unit: UnitId, action: &Action) -> Result<ActionResult> {
        let result = GameEngine::new(&mut self.state).execute(unit, action, self.rng.as_mut())?;
        self.publish_result(&result);
        if !result.casualties.is_empty() {
            self.check_end_conditions();
        }
        Ok(result)
    }

    fn publish_result(&self, result: &ActionResult) {
        if let Some(movement) = result.movement {
            self.sink.publish(&GameEvent::UnitMoved {
                unit: result.actor,
                from: movement.from,
                to: movement.to,
            });
        }
        if let Some(outcome) = &result.combat {
            self.sink.publish(&GameEvent::UnitAttacked {
                outcome: outcome.clone(),
            });
        }
        for casualty in &result.casualties {
            self.sink.publish(&GameEvent::UnitDied {
                unit: casualty.unit,
                side: casualty.side,
                position: casualty.position,
            });
        }
    }

    fn on_side_turn_started(&mut self, side: Side) {
        let turn_number = self.turn_number();
        tracing::debug!(%side, turn = turn_number, "Side turn started");
        self.sink.publish(&GameEvent::SideTurnStarted { side, turn_number });
        self.queue_automated(side);
    }

    fn queue_automated(&mut self, side: Side) {
        self.pending = if self.is_automated(side) {
            turn_order(&self.state, side).into()
        } else {
            VecDeque::new()
        };
    }

    fn report_battle_end(&mut self, result: TurnPhase) {
        if self.battle_reported {
            return;
        }
        self.battle_reported = true;
        let turn_number = self.turn_number();
        tracing::debug!(%result, turn = turn_number, "Battle ended");
        self.sink.publish(&GameEvent::BattleEnded {
            result,
            turn_number,
        });
    }
}

/// Builder for [`TurnController`].
///
/// Defaults: entropy rolls, no presentation, the default [`AiController`],
/// and only SideB automated.
pub struct TurnControllerBuilder {
    state: GameState,
    rng: Option<Box<dyn RngOracle + Send>>,
    sink: Option<Box<dyn PresentationSink>>,
    provider: Option<Box<dyn ActionProvider>>,
    automated: BTreeSet<Side>,
}

impl TurnControllerBuilder {
    fn new(state: GameState) -> Self {
        Self {
            state,
            rng: None,
            sink: None,
            provider: None,
            automated: BTreeSet::from([Side::SideB]),
        }
    }

    /// Set the roll source
    pub fn rng(mut self, rng: impl RngOracle + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Roll from a seeded [`PcgRng`]
    pub fn seed(self, seed: u64) -> Self {
        self.rng(PcgRng::new(seed))
    }

    /// Set the presentation sink
    pub fn sink(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Set the provider deciding for automated sides
    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Use an [`AiController`] with `profile`
    pub fn ai_profile(self, profile: AiProfile) -> Self {
        self.provider(AiController::new(profile))
    }

    /// Replace the set of automated sides
    pub fn automated(mut self, sides: impl IntoIterator<Item = Side>) -> Self {
        self.automated = sides.into_iter().filter(|side| side.is_combatant()).collect();
        self
    }

    /// Automate both combatant sides
    pub fn automate_all(self) -> Self {
        self.automated(Side::COMBATANTS)
    }

    pub fn build(self) -> TurnController {
        let battle_reported = self.state.phase().is_terminal();
        TurnController {
            state: self.state,
            rng: self.rng.unwrap_or_else(|| Box::new(EntropyRng::from_entropy())),
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            provider: self
                .provider
                .unwrap_or_else(|| Box::new(AiController::default())),
            automated: self.automated,
            pending: VecDeque::new(),
            battle_reported,
        }
    }
}
