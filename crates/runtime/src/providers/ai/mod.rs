//! Heuristic AI for automated units.
//!
//! Each unit decides in three steps:
//!
//! 1. **Attack in place**: if any enemy can be attacked from the current
//!    position, attack the best-scoring one. Moving is never considered in
//!    this case, even if a post-move attack would score higher.
//! 2. **Move then attack**: otherwise try every reachable tile and keep the
//!    best-scoring (tile, target) pair that becomes attackable from it.
//! 3. **Approach**: if no tile brings an enemy into range, move to the tile
//!    that best closes in on a weakened enemy.
//!
//! Hypothetical positions are evaluated through [`AiContext`] without
//! touching the board. Ties keep the first candidate found.
//!
//! # Core Components
//!
//! - [`AiController`]: decision entry point implementing [`crate::ActionProvider`]
//! - [`AttackScore`]: structured attack score, logged for debugging
//! - [`AiContext`]: read-only view of the deciding unit and its enemies
//! - [`turn_order`]: the order in which a side's units act

pub mod context;
pub mod controller;
pub mod scoring;

pub use context::AiContext;
pub use controller::{AiController, turn_order};
pub use scoring::{AttackScore, approach_score};
