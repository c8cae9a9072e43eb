//! Abstraction for sourcing unit intent.
//!
//! The turn controller asks an [`ActionProvider`] what each automated unit
//! should do, so battles can run with the AI controller, scripted fixtures,
//! or a passive side.

use tactics_core::{Action, GameState, UnitId};

/// Trait for providing actions based on the current game state.
///
/// Providers only read the state; the controller validates and executes
/// whatever they return. A provider that has nothing sensible to do returns
/// [`Action::Wait`] rather than failing.
pub trait ActionProvider: Send + Sync {
    fn provide_action(&self, unit: UnitId, state: &GameState) -> Action;
}

/// A simple action provider that always returns Wait action.
/// Useful for testing or as a fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct WaitActionProvider;

impl ActionProvider for WaitActionProvider {
    fn provide_action(&self, _unit: UnitId, _state: &GameState) -> Action {
        Action::Wait
    }
}
