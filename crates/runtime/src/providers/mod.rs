//! Action provider implementations for automated sides.

pub mod ai;

pub use ai::{AiContext, AiController, AttackScore, turn_order};
