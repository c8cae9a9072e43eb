//! Deterministic rules of a hex-grid tactics battle.
//!
//! `tactics-core` defines the canonical rules (hex math, board index, unit
//! state, combat, turn state machine) and exposes pure APIs that are reused by
//! the runtime, the content loaders and tests. All state mutation flows
//! through [`engine::GameEngine`]; randomness only enters through an
//! [`rng::RngOracle`] supplied by the caller.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod error;
pub mod hex;
pub mod rng;
pub mod state;

pub use action::{Action, ActionError};
pub use combat::{AttackOutcome, CombatOutcome, CombatPreview};
pub use config::{AiProfile, GameConfig};
pub use engine::{
    ActionResult, Casualty, ExecuteError, GameEngine, Movement, TransitionPhase, TurnError,
};
pub use error::{ErrorSeverity, GameError};
pub use hex::{HexCoord, HexError};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use state::{
    Board, BoardDimensions, BoardError, GameSnapshot, GameState, Side, SnapshotError, StateError,
    TurnFlags, TurnPhase, TurnState, Unit, UnitId, UnitPhase, UnitRecord, UnitStats,
};
